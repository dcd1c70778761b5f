//! Command-line interface definitions.
//!
//! Each invocation is one page load: the sidebar attaches to `LOCATION`,
//! consuming any scroll offset a previous `click` left in the session file.

use crate::utils::link::root_prefix_for;
use crate::utils::url::{canonicalize, normalize_location};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Documentation sidebar: active entry, expansion and scroll handoff
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Config file name (default: tocbar.toml)
    #[arg(short = 'C', long, default_value = "tocbar.toml")]
    pub config: PathBuf,

    /// Navigation tree file (.html, .toml or .json)
    #[arg(short, long)]
    pub nav: Option<PathBuf>,

    /// Session file standing in for the browser tab's session storage
    #[arg(short, long)]
    pub session: Option<PathBuf>,

    /// Collapse non-affixed sections that do not lead to the current page
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub fold: Option<bool>,

    /// Silence log output
    #[arg(short, long)]
    pub quiet: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// The page the sidebar attaches to.
#[derive(clap::Args, Debug, Clone)]
pub struct PageArgs {
    /// Absolute URL of the current page
    pub location: String,

    /// Relative path from the page back to the documentation root
    #[arg(short, long, conflicts_with = "site_root")]
    pub root_prefix: Option<String>,

    /// URL of the documentation root; derives the root prefix from LOCATION
    #[arg(long)]
    pub site_root: Option<String>,
}

impl PageArgs {
    /// Explicit `--root-prefix`, else derived from `--site-root`, else empty.
    pub fn root_prefix(&self) -> String {
        if let Some(prefix) = &self.root_prefix {
            return prefix.clone();
        }
        let Some(site_root) = &self.site_root else {
            return String::new();
        };

        let page = normalize_location(&self.location);
        let site_root = canonicalize(site_root);
        page.strip_prefix(site_root.trim_end_matches('/'))
            .map(root_prefix_for)
            .unwrap_or_default()
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Html,
    Json,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Attach to a page and print the sidebar
    Render {
        #[command(flatten)]
        page: PageArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },

    /// Attach to a page and print the active entry and opened groups as JSON
    Resolve {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Attach, click a sidebar link and print the URL navigated to
    Click {
        #[command(flatten)]
        page: PageArgs,

        /// Link of the entry as written in the navigation tree
        href: String,

        /// Scroll the sidebar to this offset before clicking
        #[arg(long)]
        scroll: Option<f64>,
    },

    /// Attach, flip a group open or closed and print the sidebar
    Toggle {
        #[command(flatten)]
        page: PageArgs,

        /// Link of the group entry as written in the navigation tree
        href: String,
    },
}

impl Commands {
    pub const fn page(&self) -> &PageArgs {
        match self {
            Self::Render { page, .. }
            | Self::Resolve { page }
            | Self::Click { page, .. }
            | Self::Toggle { page, .. } => page,
        }
    }
}
