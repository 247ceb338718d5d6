use super::client::{HttpApiClient, RequestBody};
use async_trait::async_trait;
use cinema_core::api::{ApiResult, ChatApi};
use cinema_core::chat::{ChatReply, ChatRequest};

#[async_trait]
impl ChatApi for HttpApiClient {
    async fn ask(&self, request: &ChatRequest) -> ApiResult<ChatReply> {
        self.fetch_chat(&["chat"], RequestBody::json(request)?).await
    }
}
