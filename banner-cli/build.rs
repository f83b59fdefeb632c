use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the CLI skeleton from src/main.rs. We need to duplicate this here
// since build scripts can't access src/ modules.
fn completion_cli() -> Command {
    Command::new("banners")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage the global message banners of a hosted DevOps project")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(Arg::new("url").long("url").value_name("URL").global(true))
        .arg(
            Arg::new("token")
                .long("token")
                .value_name("TOKEN")
                .global(true),
        )
        .subcommand(Command::new("list"))
        .subcommand(
            Command::new("add")
                .arg(Arg::new("message").required(true).index(1))
                .arg(Arg::new("level").long("level"))
                .arg(Arg::new("priority").long("priority"))
                .arg(Arg::new("expires").long("expires")),
        )
        .subcommand(Command::new("delete").arg(Arg::new("key").required(true).index(1)))
        .subcommand(
            Command::new("delete-all").arg(
                Arg::new("yes")
                    .long("yes")
                    .action(ArgAction::SetTrue),
            ),
        )
        .subcommand(
            Command::new("preview")
                .arg(Arg::new("message").required(true).index(1))
                .arg(Arg::new("to").long("to"))
                .arg(Arg::new("entry").long("entry").action(ArgAction::SetTrue)),
        )
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = completion_cli();

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "banners", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "banners", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "banners", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
