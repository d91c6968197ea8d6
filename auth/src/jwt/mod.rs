pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use codec::TokenCodec;
pub use codec::TokenPair;
pub use codec::TokenValidation;
pub use codec::VerifiedToken;
pub use errors::InvalidReason;
pub use errors::TokenError;
