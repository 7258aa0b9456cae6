use uuid::Uuid;

use crate::transfer::UserDto;

pub struct LoginDto {
    pub email: String,
}

pub struct SessionTokenDto {
    pub token: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDto {
    pub token: Uuid,
    pub user: UserDto,
}
