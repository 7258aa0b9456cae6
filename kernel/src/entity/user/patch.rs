use crate::entity::{UserName, UserRole};

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct UserPatch {
    pub name: Option<UserName>,
    pub role: Option<UserRole>,
}
