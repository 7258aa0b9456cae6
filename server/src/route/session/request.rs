use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{LoginDto, SessionTokenDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    email: String,
}

#[derive(Debug)]
pub struct TokenRequest {
    token: Uuid,
}

impl TokenRequest {
    pub fn new(token: Uuid) -> Self {
        Self { token }
    }
}

pub struct Transformer;

impl Intake<LoginRequest> for Transformer {
    type To = LoginDto;
    fn emit(&self, input: LoginRequest) -> Self::To {
        LoginDto { email: input.email }
    }
}

impl Intake<TokenRequest> for Transformer {
    type To = SessionTokenDto;
    fn emit(&self, input: TokenRequest) -> Self::To {
        SessionTokenDto { token: input.token }
    }
}
