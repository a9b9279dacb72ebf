use derive_more::{Deref, Display, From, Into};

use crate::ReadError;

#[allow(async_fn_in_trait)]
pub trait SessionService {
    async fn get_current_user(&self) -> Result<Option<User>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    async fn read_current_user(&self) -> Result<Option<User>, ReadError>;
}

/// The signed-in user all workout queries are scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct User {
    pub id: UserID,
}

#[derive(
    Deref, Display, From, Into, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct UserID(u64);
