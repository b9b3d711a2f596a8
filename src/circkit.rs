extern crate clap;
use clap::*;
use std::io::Write;

mod cmd_circkit;

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format(|buf, record| match record.level() {
            log::Level::Error => writeln!(buf, "error: {}", record.args()),
            log::Level::Warn => writeln!(buf, "warning: {}", record.args()),
            _ => writeln!(buf, "debug {}", record.args()),
        })
        .init();
}

fn main() -> anyhow::Result<()> {
    let app = Command::new("circkit")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`circkit` - Circos Kit")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_circkit::binlinks::make_subcommand())
        .after_help(
            r###"Subcommands:

* Tracks:
    * binlinks - Bin link ends into density tracks

"###,
        );

    let matches = app.get_matches();

    let verbosity = match matches.subcommand() {
        Some((_, sub_matches)) => sub_matches
            .try_get_one::<u8>("debug")
            .ok()
            .flatten()
            .copied()
            .unwrap_or(0),
        None => 0,
    };
    init_logger(verbosity);

    // Check which subcomamnd the user ran...
    match matches.subcommand() {
        Some(("binlinks", sub_matches)) => cmd_circkit::binlinks::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
