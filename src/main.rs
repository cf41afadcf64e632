use anyhow::Result;
use clap::{crate_version, App as Cli, Arg};
use fundmon_shell::{app::App, config::Config};

fn main() -> Result<()> {
    let matches = Cli::new("fundmon-shell")
        .version(crate_version!())
        .about("Terminal shell for the NHM Fund Monitor dashboards")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("site")
                .short("s")
                .long("site")
                .value_name("DIR")
                .help("Directory of page manifests")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("page")
                .short("p")
                .long("page")
                .value_name("PATH")
                .help("Page to open first, e.g. /admin-dashboard.html")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(site) = matches.value_of("site") {
        config.site_dir = site.into();
    }
    if let Some(page) = matches.value_of("page") {
        config.start_page = page.to_string();
    }

    App::start(config)
}
