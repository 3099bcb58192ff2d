use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use showcase_core::models::Role;

#[derive(Parser, Debug)]
#[command(name = "showcase", version, about = "Browse, submit and review student projects")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the version.
    Version,

    /// Show the navigation links available to the current user.
    Nav,

    /// Show who is signed in.
    Whoami,

    /// Sign in and save the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SHOWCASE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account.
    Register(RegisterArgs),

    /// Forget the saved session.
    Logout,

    /// Browse approved projects.
    Gallery(GalleryArgs),

    /// Show one project in full.
    Show { id: String },

    /// List submissions awaiting review (supervisor, admin).
    Pending,

    /// Approve a pending submission (supervisor, admin).
    Approve {
        id: String,
        #[arg(long)]
        comments: Option<String>,
    },

    /// Reject a pending submission with feedback (supervisor, admin).
    Reject {
        id: String,
        #[arg(long)]
        comments: String,
    },

    /// Submit a project for review (student).
    Submit(SubmitArgs),

    /// Show project statistics (admin).
    Dashboard,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "SHOWCASE_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long, default_value = "student")]
    pub role: Role,
    #[arg(long)]
    pub faculty: String,
}

#[derive(Args, Debug)]
pub struct GalleryArgs {
    /// Case-insensitive match on the faculty name.
    #[arg(long)]
    pub faculty: Option<String>,
    /// Case-insensitive match on the category name.
    #[arg(long)]
    pub category: Option<String>,
    /// Exact year.
    #[arg(long)]
    pub year: Option<String>,
    /// Case-insensitive match on any technology tag.
    #[arg(long)]
    pub tech: Option<String>,
    /// Also list the available faculties, years and categories.
    #[arg(long)]
    pub facets: bool,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub category: String,
    /// Comma-separated, e.g. "React, Node.js".
    #[arg(long)]
    pub technologies: String,
    #[arg(long)]
    pub year: String,
    #[arg(long)]
    pub faculty: String,
    /// PDF to upload.
    #[arg(long)]
    pub document: PathBuf,
}
