use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::validate_token;
use crate::domain::token::service::ValidationService;
use crate::proto::auth_service_server::AuthService as AuthServiceProto;
use crate::proto::TokenRequest;
use crate::proto::TokenResponse;

pub struct AuthGrpcService {
    service: Arc<ValidationService>,
}

impl AuthGrpcService {
    pub fn new(service: Arc<ValidationService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl AuthServiceProto for AuthGrpcService {
    async fn validate_token(
        &self,
        request: Request<TokenRequest>,
    ) -> Result<Response<TokenResponse>, Status> {
        let response = validate_token::validate_token(&self.service, request.into_inner())?;
        Ok(Response::new(response))
    }
}
