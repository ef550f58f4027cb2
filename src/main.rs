use clap::Parser;
use mdgen::cli::{Cli, Commands};
use mdgen::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    mdgen::cli::init_logging(cli.verbose, cli.quiet);

    let printer = Printer::new().quiet(cli.quiet);

    match cli.command {
        Commands::Generate(args) => mdgen::cli::generate::run(args, &printer)?,
        Commands::List(args) => mdgen::cli::list::run(args, &printer)?,
        Commands::Init(args) => mdgen::cli::init::run(args, &printer)?,
        Commands::Completions(args) => mdgen::cli::completions::run(args)?,
        Commands::Version => mdgen::cli::print_version(),
    }

    Ok(())
}
