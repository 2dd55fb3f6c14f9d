mod app;
mod camera;
mod config;
mod input;

fn main() -> anyhow::Result<()>
{
  // Camera pose is logged at debug level; run with RUST_LOG=debug to see it.
  if std::env::var_os("RUST_LOG").is_none()
  {
    std::env::set_var("RUST_LOG", "info");
  }
  env_logger::init();

  let settings = config::from_args()?;
  app::run(&settings)
}
