//! Command execution context
//!
//! Provides a unified context for command execution: config loading, session
//! restore, client construction and the auth gate.

use std::sync::Arc;

use log::debug;
use tokio_util::sync::CancellationToken;

use crate::auth::role::ADMIN_ROLE;
use crate::auth::{AuthGate, FileTokenStore, Principal, Session};
use crate::cli::args::{GlobalOptions, ListArgs};
use crate::cli::OutputFormat;
use crate::client::{BearerSlot, ClinicClient, ScanOptions};
use crate::config::Config;
use crate::error::Result;
use crate::view::{FormResource, ListView};

/// Context for command execution containing config, client and session.
pub struct CommandContext {
    /// Loaded configuration (defaults when no file exists)
    pub config: Config,
    /// HTTP client sharing the session's bearer slot
    pub client: ClinicClient,
    /// Session restored from the token store
    pub session: Session,
    /// Output format after config preference
    pub format: OutputFormat,
    /// The command as typed
    pub command_line: String,
    /// Fires on Ctrl-C once a scan has started
    pub cancel: CancellationToken,
}

impl CommandContext {
    /// Build the context: load config, restore the session from the state
    /// directory and point the client at the resolved API URL.
    ///
    /// No network call is made.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        let format = opts.resolve_format(&config);

        let state_dir = Config::state_dir(opts.config_ref())?;
        let store = Arc::new(FileTokenStore::new(state_dir));
        let bearer = BearerSlot::new();
        let session = Session::restore(store, bearer.clone()).await;

        let api_url = config.api_url(opts.api_url_ref());
        debug!("Using API at {}", api_url);
        let client = ClinicClient::new(api_url, bearer)?;

        Ok(Self {
            config,
            client,
            session,
            format,
            command_line: opts.command_line.clone(),
            cancel: CancellationToken::new(),
        })
    }

    /// Let the command through for any signed-in user.
    pub fn require_login(&self) -> Result<Principal> {
        AuthGate::new(&self.session).enforce(&self.command_line)
    }

    /// Let the command through for admins only.
    pub fn require_admin(&self) -> Result<Principal> {
        AuthGate::new(&self.session)
            .require_role(ADMIN_ROLE)
            .enforce(&self.command_line)
    }

    /// Scan limits from config, cancelled on Ctrl-C.
    ///
    /// The interrupt handler is only installed here, so commands that never
    /// scan keep the default Ctrl-C behaviour.
    pub fn scan_options(&self) -> ScanOptions {
        let on_interrupt = self.cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("Interrupted; cancelling scans");
                on_interrupt.cancel();
            }
        });

        ScanOptions::default()
            .max_pages(self.config.preferences.scan_page_limit)
            .cancel_with(self.cancel.child_token())
    }

    /// List view for `R` configured from preferences and `args`.
    pub fn list_view<R: FormResource>(
        &self,
        can_manage: bool,
        args: &ListArgs,
    ) -> ListView<'_, R, ClinicClient> {
        let prefs = &self.config.preferences;
        let mut view = ListView::new(&self.client, can_manage)
            .with_page_size(args.page_size(prefs.page_size))
            .with_debounce(std::time::Duration::from_millis(prefs.debounce_ms))
            .with_page(args.page.unwrap_or(1));
        if let Some(term) = args.search_term() {
            view = view.with_search(term);
        }
        if let Some(field) = &args.sort_by {
            let order = args.sort_dir.map(Into::into).unwrap_or(crate::client::SortOrder::Asc);
            view = view.with_sort(field.clone(), order);
        }
        view
    }
}
