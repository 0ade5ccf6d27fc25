pub mod account_menu;
pub mod app;
pub mod browser_store;
pub mod module_list;
pub mod notify;
pub mod session_state;
pub mod shoutbox_view;
