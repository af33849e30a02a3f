use anyhow::Result;
use clap::{crate_version, App as ClapApp, Arg};
use tracker_tui::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new("tracker-tui")
        .version(crate_version!())
        .about("A terminal habit, goal and task tracker")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("init-config")
                .long("init-config")
                .help("Write the default configuration file and exit"),
        )
        .get_matches();

    if matches.is_present("init-config") {
        // The existing file may be the broken one being replaced.
        let config = Config::at(matches.value_of("config"))?;
        config.save()?;
        if let Some(path) = config.file_path() {
            println!("Wrote configuration to {}", path.display());
        }
        return Ok(());
    }

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;

    App::start(config).await
}
