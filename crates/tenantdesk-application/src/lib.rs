pub mod auth_usecase;
pub mod screens;

pub use auth_usecase::{AuthUseCase, LoginResult};
pub use screens::{AgentsScreen, Banners, FormMode, TenantsScreen, UsersScreen};
