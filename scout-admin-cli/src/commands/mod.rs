mod dashboard;
mod events;
mod gyms;
mod login;
mod notify;
mod open;
mod plans;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use scout_admin::models::GymTier;
use std::path::PathBuf;

use crate::api::ApiClient;
use crate::config::Config;
use crate::routes::{resolve, Navigation, View};
use crate::session::SessionState;

pub use dashboard::render_counts;
pub use events::render_categories;
pub use plans::render_draft;

#[derive(Parser)]
#[command(name = "scout-admin")]
#[command(about = "Fitness Scout admin dashboard in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "SCOUT_ADMIN_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as an administrator
    Login {
        /// Admin email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Navigate to a dashboard path such as /gyms or /gym-detail/<id>
    Open {
        path: String,
    },

    /// Show collection counts
    Dashboard,

    /// List registered users
    Users,

    /// List approved and rejected gyms
    Gyms,

    /// Show one gym in detail
    Gym {
        /// Gym ID
        id: String,
    },

    /// List gyms waiting for approval
    Approvals,

    /// Approve a pending gym
    Approve {
        /// Gym ID
        id: String,

        /// Tier to grant (Basic, Silver or Diamond); defaults to the requested tier
        #[arg(long)]
        tier: Option<GymTier>,
    },

    /// Reject a pending gym
    Reject {
        /// Gym ID
        id: String,
    },

    /// Show a gym's withdrawal requests
    Transactions {
        /// Gym ID
        gym_id: String,
    },

    /// Mark a withdrawal request as paid
    Pay {
        /// Gym ID
        gym_id: String,

        /// Position of the transaction in the gym's list
        index: usize,
    },

    /// Manage diet plans
    #[command(subcommand)]
    Plans(PlansSubcommands),

    /// Manage events
    #[command(subcommand)]
    Events(EventsSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum PlansSubcommands {
    /// List diet plans
    List,

    /// Show every meal of a diet plan
    Show {
        /// Diet plan ID
        id: String,
    },

    /// Build a new diet plan interactively
    Create,

    /// Delete a diet plan
    Delete {
        /// Diet plan ID
        id: String,
    },
}

#[derive(Subcommand)]
enum EventsSubcommands {
    /// List events grouped into past, today and upcoming
    List,

    /// Create an event interactively
    Create,

    /// Edit an event interactively
    Update {
        /// Event ID
        id: String,
    },

    /// Delete an event
    Delete {
        /// Event ID
        id: String,
    },
}

/// State shared by every command of one invocation.
pub struct Context {
    pub session: SessionState,
    pub assume_yes: bool,
}

impl Context {
    /// Pass `view` through the route gate and build a client for it.
    pub fn client_for(&self, view: &View) -> Result<ApiClient> {
        match resolve(&view.path(), &self.session) {
            Navigation::Render(_) => ApiClient::new(self.session.config(), self.session.token()),
            Navigation::Redirect(target) => {
                notify::failure(&format!("{} requires a signed-in administrator", view));
                bail!("Redirected to {}: run `scout-admin login` first", target)
            }
        }
    }

    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        notify::confirm(prompt, self.assume_yes)
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::info!("Verbose mode enabled");
        }

        if let Commands::Completions { shell } = self.command {
            generate_completions(shell);
            return Ok(());
        }

        let path = Config::resolve_path(self.config)?;
        let config = Config::load(&path)?;
        let mut ctx = Context {
            session: SessionState::init(config, path),
            assume_yes: self.yes,
        };

        match self.command {
            Commands::Login { email } => login::login(&mut ctx, email).await,
            Commands::Logout => login::logout(&mut ctx).await,
            Commands::Open { path } => open::open(&mut ctx, &path).await,
            Commands::Dashboard => dashboard::show_dashboard(&ctx).await,
            Commands::Users => dashboard::list_users(&ctx).await,
            Commands::Gyms => gyms::list_gyms(&ctx).await,
            Commands::Gym { id } => gyms::show_gym(&ctx, &id).await,
            Commands::Approvals => gyms::list_approvals(&ctx).await,
            Commands::Approve { id, tier } => gyms::approve(&ctx, &id, tier).await,
            Commands::Reject { id } => gyms::reject(&ctx, &id).await,
            Commands::Transactions { gym_id } => gyms::show_transactions(&ctx, &gym_id).await,
            Commands::Pay { gym_id, index } => gyms::pay(&ctx, &gym_id, index).await,
            Commands::Plans(subcmd) => match subcmd {
                PlansSubcommands::List => plans::list_plans(&ctx).await,
                PlansSubcommands::Show { id } => plans::show_plan(&ctx, &id).await,
                PlansSubcommands::Create => plans::create_plan(&ctx).await,
                PlansSubcommands::Delete { id } => plans::delete_plan(&ctx, &id).await,
            },
            Commands::Events(subcmd) => match subcmd {
                EventsSubcommands::List => events::list_events(&ctx).await,
                EventsSubcommands::Create => events::create_event(&ctx).await,
                EventsSubcommands::Update { id } => events::update_event(&ctx, &id).await,
                EventsSubcommands::Delete { id } => events::delete_event(&ctx, &id).await,
            },
            Commands::Completions { .. } => Ok(()),
        }
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
