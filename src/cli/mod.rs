pub mod doctor;
pub mod install;
pub mod list;
pub mod self_update;
pub mod uninstall;
pub mod update;
