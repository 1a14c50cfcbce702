use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    dropins completions bash > ~/.bash_completion.d/dropins\n\n\
                  Generate zsh completions:\n    dropins completions zsh > ~/.zfunc/_dropins\n\n\
                  Generate fish completions:\n    dropins completions fish > ~/.config/fish/completions/dropins.fish\n\n\
                  Generate PowerShell completions:\n    dropins completions powershell")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
