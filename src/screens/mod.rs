pub mod confirm_quit;
pub mod dashboard;
pub mod query;
pub mod tokenize;
pub mod transfer;

pub use confirm_quit::ConfirmQuitScreen;
pub use dashboard::DashboardScreen;
pub use query::QueryScreen;
pub use tokenize::TokenizeScreen;
pub use transfer::TransferScreen;
