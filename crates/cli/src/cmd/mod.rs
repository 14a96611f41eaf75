mod env;
mod image;
mod run;

pub use env::cmd_env;
pub use image::cmd_image;
pub use run::cmd_run;
