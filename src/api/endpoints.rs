//! Backend endpoint catalogue.
//!
//! Each endpoint is a fixed path template (some take an id segment), an HTTP
//! method, and whether it needs a bearer token.

use reqwest::Method;

pub type ProductId = u64;
pub type CategoryId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Signup,
    EmailSend,
    EmailVerify,
    Logout,
    Reissue,

    ProductList,
    ProductDetail(ProductId),
    ProductCreate,
    ProductUpdate(ProductId),
    ProductDelete(ProductId),
    ProductLike(ProductId),
    ProductUnlike(ProductId),

    MemberInfo,
    MemberProducts,
    MemberLikes,
    MemberNickname,
    MemberPassword,
    MemberImage,
    MemberDelete,

    Categories,
    CategoryProducts(CategoryId),
}

impl Endpoint {
    pub fn method(&self) -> Method {
        use Endpoint::*;
        match self {
            ProductList | ProductDetail(_) | MemberInfo | MemberProducts | MemberLikes
            | Categories | CategoryProducts(_) => Method::GET,
            Login | Signup | EmailSend | EmailVerify | Logout | Reissue | ProductCreate
            | ProductLike(_) => Method::POST,
            ProductUpdate(_) | MemberImage => Method::PUT,
            MemberNickname | MemberPassword => Method::PATCH,
            ProductDelete(_) | ProductUnlike(_) | MemberDelete => Method::DELETE,
        }
    }

    /// Path relative to the API base URL.
    pub fn path(&self) -> String {
        use Endpoint::*;
        match self {
            Login => "/auth/login".to_string(),
            Signup => "/auth/signup".to_string(),
            EmailSend => "/auth/email/send".to_string(),
            EmailVerify => "/auth/email/verify".to_string(),
            Logout => "/auth/logout".to_string(),
            Reissue => "/auth/reissue".to_string(),

            ProductList | ProductCreate => "/products".to_string(),
            ProductDetail(id) | ProductUpdate(id) | ProductDelete(id) => {
                format!("/products/{}", id)
            }
            ProductLike(id) | ProductUnlike(id) => format!("/products/{}/like", id),

            MemberInfo | MemberDelete => "/members/me".to_string(),
            MemberProducts => "/members/me/products".to_string(),
            MemberLikes => "/members/me/likes".to_string(),
            MemberNickname => "/members/me/nickname".to_string(),
            MemberPassword => "/members/me/password".to_string(),
            MemberImage => "/members/me/image".to_string(),

            Categories => "/categories".to_string(),
            CategoryProducts(id) => format!("/categories/{}/products", id),
        }
    }

    /// Whether a bearer token is attached and a 401 may trigger a reissue.
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Endpoint::Login
                | Endpoint::Signup
                | Endpoint::EmailSend
                | Endpoint::EmailVerify
                | Endpoint::Reissue
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_endpoints() {
        for endpoint in [
            Endpoint::Login,
            Endpoint::Signup,
            Endpoint::EmailSend,
            Endpoint::EmailVerify,
            Endpoint::Reissue,
        ] {
            assert!(!endpoint.requires_auth(), "{:?} should be public", endpoint);
        }
        assert!(Endpoint::Logout.requires_auth());
        assert!(Endpoint::Categories.requires_auth());
        assert!(Endpoint::ProductLike(1).requires_auth());
    }

    #[test]
    fn test_paths_and_methods() {
        assert_eq!(Endpoint::ProductDetail(42).path(), "/products/42");
        assert_eq!(Endpoint::ProductDetail(42).method(), Method::GET);
        assert_eq!(Endpoint::ProductUpdate(42).method(), Method::PUT);
        assert_eq!(Endpoint::ProductDelete(42).method(), Method::DELETE);
        assert_eq!(Endpoint::ProductLike(3).path(), "/products/3/like");
        assert_eq!(Endpoint::ProductUnlike(3).method(), Method::DELETE);
        assert_eq!(Endpoint::MemberNickname.method(), Method::PATCH);
        assert_eq!(Endpoint::CategoryProducts(9).path(), "/categories/9/products");
        assert_eq!(Endpoint::Reissue.path(), "/auth/reissue");
    }
}
