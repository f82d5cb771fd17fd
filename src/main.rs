use yulemorph::MorphConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = yulemorph::run(MorphConfig::default()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
