use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{GetBorrowerBookDto, UpdateUserDto};
use kernel::prelude::entity::UserRole;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    name: Option<String>,
    role: Option<UserRole>,
}

#[derive(Debug)]
pub struct GetBooksRequest {
    id: Uuid,
}

impl GetBooksRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Intake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateUserDto;
    fn emit(&self, input: (Uuid, UpdateRequest)) -> Self::To {
        let (id, input) = input;
        UpdateUserDto {
            id,
            name: input.name,
            is_admin: input.role.map(|role| role.is_admin()),
        }
    }
}

impl Intake<GetBooksRequest> for Transformer {
    type To = GetBorrowerBookDto;
    fn emit(&self, input: GetBooksRequest) -> Self::To {
        GetBorrowerBookDto { user_id: input.id }
    }
}
