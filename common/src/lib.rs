pub mod account;
pub mod account_view;
pub mod manifest;
pub mod password;
pub mod shoutbox;
pub mod storage;
