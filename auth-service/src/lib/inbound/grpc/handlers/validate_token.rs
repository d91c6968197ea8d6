use tonic::Status;

use crate::domain::token::service::ValidationService;
use crate::proto::TokenRequest;
use crate::proto::TokenResponse;

pub fn validate_token(
    service: &ValidationService,
    request: TokenRequest,
) -> Result<TokenResponse, Status> {
    let result = service.validate(&request.token)?;
    Ok(result.into())
}
