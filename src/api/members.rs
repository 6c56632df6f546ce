//! Member (account) operations for the logged-in user.
//!
//! Profile reads are published to the session store so observers see the
//! current nickname and image without re-fetching.

use super::client::ApiClient;
use super::endpoints::Endpoint;
use super::error::ApiResult;
use super::request::{MultipartPart, RequestDescriptor};
use super::types::{MemberProfile, NicknameRequest, Page, PasswordChangeRequest, ProductQuery, ProductSummary};

/// Multipart field name the backend expects for the profile image.
const IMAGE_FIELD: &str = "image";

/// Fetch the logged-in member's profile and publish it to the session.
pub async fn fetch_profile(client: &ApiClient) -> ApiResult<MemberProfile> {
    let profile: MemberProfile = client
        .execute(&RequestDescriptor::new(Endpoint::MemberInfo))
        .await?;
    client.tokens().session().set_profile(profile.clone());
    Ok(profile)
}

/// Listings posted by the logged-in member.
pub async fn my_products(client: &ApiClient, query: &ProductQuery) -> ApiResult<Page<ProductSummary>> {
    let descriptor = RequestDescriptor::new(Endpoint::MemberProducts).query_pairs(query.to_pairs());
    client.execute(&descriptor).await
}

/// Listings the logged-in member has liked.
pub async fn my_likes(client: &ApiClient, query: &ProductQuery) -> ApiResult<Page<ProductSummary>> {
    let descriptor = RequestDescriptor::new(Endpoint::MemberLikes).query_pairs(query.to_pairs());
    client.execute(&descriptor).await
}

pub async fn change_nickname(client: &ApiClient, nickname: &str) -> ApiResult<MemberProfile> {
    let descriptor = RequestDescriptor::new(Endpoint::MemberNickname).json(&NicknameRequest {
        nickname: nickname.to_string(),
    })?;
    let profile: MemberProfile = client.execute(&descriptor).await?;
    client.tokens().session().set_profile(profile.clone());
    Ok(profile)
}

pub async fn change_password(
    client: &ApiClient,
    current_password: &str,
    new_password: &str,
) -> ApiResult<()> {
    let descriptor = RequestDescriptor::new(Endpoint::MemberPassword).json(&PasswordChangeRequest {
        current_password: current_password.to_string(),
        new_password: new_password.to_string(),
    })?;
    client.execute(&descriptor).await
}

/// Upload a new profile image (multipart). Returns the updated profile.
pub async fn upload_profile_image(
    client: &ApiClient,
    file_name: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> ApiResult<MemberProfile> {
    let descriptor = RequestDescriptor::new(Endpoint::MemberImage)
        .multipart(vec![MultipartPart::file(IMAGE_FIELD, file_name, mime, bytes)]);
    let profile: MemberProfile = client.execute(&descriptor).await?;
    client.tokens().session().set_profile(profile.clone());
    Ok(profile)
}

/// Delete the account. On success the local credentials are cleared too.
pub async fn delete_account(client: &ApiClient) -> ApiResult<()> {
    client
        .execute::<()>(&RequestDescriptor::new(Endpoint::MemberDelete))
        .await?;
    log::info!("Account deleted");
    client.tokens().clear();
    Ok(())
}
