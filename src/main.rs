use clap::Parser;
use miette::Result;
use fcc::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head` causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    fcc::cli::logging::init(global.quiet, global.verbose);

    match cli.command {
        Commands::Calc(args) => fcc::cli::commands::calc::run(args, &global),
        Commands::Curve(args) => fcc::cli::commands::curve::run(args, &global),
        Commands::Pem(args) => fcc::cli::commands::pem::run(args, &global),
        Commands::New(args) => fcc::cli::commands::new::run(args),
        Commands::Validate(args) => fcc::cli::commands::validate::run(args),
        Commands::Config(cmd) => fcc::cli::commands::config::run(cmd),
        Commands::Completions(args) => fcc::cli::commands::completions::run(args),
    }
}
