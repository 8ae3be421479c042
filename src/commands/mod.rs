pub mod build_deb;
pub mod info;
pub mod init;
pub mod update;
