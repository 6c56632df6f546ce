//! Request and response payloads for the marketplace backend.
//!
//! All structs use camelCase serialization to match the API's JSON format.

use serde::{Deserialize, Serialize};

use super::endpoints::{CategoryId, ProductId};

/// Login request body sent to POST /auth/login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup request body sent to POST /auth/signup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSendRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailVerifyRequest {
    pub email: String,
    pub code: String,
}

/// Reissue request body sent to POST /auth/reissue.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReissueRequest {
    pub refresh_token: String,
}

/// Token payload returned by login and reissue.
///
/// The backend may skip rotating the refresh token on reissue, in which case
/// `refresh_token` is absent and the stored one stays valid.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub id: u64,
    pub email: String,
    pub nickname: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NicknameRequest {
    pub nickname: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: u64,
    pub nickname: String,
    pub image_url: Option<String>,
}

/// Listing card as returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub title: String,
    pub price: i64,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub liked: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: i64,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub category: Option<Category>,
    pub seller: Seller,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub liked: bool,
    pub created_at: String,
}

/// Create/update body for a listing. Image URLs come from a prior upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub category_id: CategoryId,
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedProduct {
    pub id: ProductId,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub liked: bool,
    pub like_count: u32,
}

/// One page of a paged listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    #[serde(default)]
    pub has_next: bool,
}

/// Filters for product list endpoints, sent as query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub category_id: Option<CategoryId>,
    pub keyword: Option<String>,
}

impl ProductQuery {
    /// Query pairs for the set filters, in a stable order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        if let Some(category_id) = self.category_id {
            pairs.push(("categoryId".to_string(), category_id.to_string()));
        }
        if let Some(ref keyword) = self.keyword {
            let keyword = keyword.trim();
            if !keyword.is_empty() {
                pairs.push(("keyword".to_string(), keyword.to_string()));
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_query_pairs() {
        assert!(ProductQuery::default().to_pairs().is_empty());

        let query = ProductQuery {
            page: Some(0),
            size: Some(20),
            category_id: Some(3),
            keyword: Some("  pop-top ".into()),
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "20".to_string()),
                ("categoryId".to_string(), "3".to_string()),
                ("keyword".to_string(), "pop-top".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_keyword_skipped() {
        let query = ProductQuery {
            keyword: Some("   ".into()),
            ..Default::default()
        };
        assert!(query.to_pairs().is_empty());
    }

    #[test]
    fn test_product_detail_defaults() {
        let detail: ProductDetail = serde_json::from_value(serde_json::json!({
            "id": 11,
            "title": "2019 Sprinter 144",
            "description": "Off-grid build",
            "price": 68000,
            "category": null,
            "seller": { "id": 2, "nickname": "roamer", "imageUrl": null },
            "createdAt": "2026-09-01T10:00:00"
        }))
        .unwrap();
        assert!(detail.image_urls.is_empty());
        assert_eq!(detail.like_count, 0);
        assert!(!detail.liked);
    }
}
