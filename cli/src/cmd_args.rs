use std::ffi::OsString;

use clap::Parser;

use crate::config;

#[derive(Parser, Debug)]
#[command(version, about = "Terminal client for a to-do list service", long_about = None)]
struct ClapArgs {
    /// Base URL of the to-do list service. Falls back to TODO_LIST_BASE_URL,
    /// then to http://127.0.0.1:3000.
    #[arg(short = 'u', long)]
    base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    base_url: String,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        Self {
            base_url: args.base_url.unwrap_or_else(config::base_url_from_env),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
