mod command;
mod helper;
mod input;
mod render;

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::history::DefaultHistory;
use tracing_subscriber::EnvFilter;

use utsocial_application::{AuthForm, AuthOutcome, AuthUseCase, FeedUseCase, ProfileUseCase};
use utsocial_core::auth::{AuthMode, AuthService};
use utsocial_core::config::AppConfig;
use utsocial_core::feed::{CareerFilter, FeedSource};
use utsocial_core::session::{Access, InMemorySessionStore, Route, SessionStore};
use utsocial_infrastructure::{ConfigService, FileSessionStore, MockFeedSource};
use utsocial_interaction::HttpAuthClient;

use command::Command;
use helper::CliHelper;
use input::Input;

type Repl = Editor<CliHelper, DefaultHistory>;

/// Reads one answer. Passwords are masked and kept out of the history.
fn read_line(rl: &mut Repl, prompt: &str, masked: bool) -> Result<Input> {
    if let Some(helper) = rl.helper_mut() {
        helper.masking = masked;
    }
    let readline = rl.readline(prompt);
    if let Some(helper) = rl.helper_mut() {
        helper.masking = false;
    }

    let input = Input::from_readline(readline)?;
    if let Input::Line(line) = &input
        && !masked
        && !line.trim().is_empty()
    {
        let _ = rl.add_history_entry(line.as_str());
    }
    Ok(input)
}

fn ctrl_c_hint() {
    println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
}

enum Flow {
    Continue,
    Quit,
}

struct App {
    auth: AuthUseCase,
    feed: FeedUseCase,
    profile: ProfileUseCase,
    route: Route,
    /// Post ids in the order they were last printed.
    listing: Vec<String>,
    /// Terminal log lines already printed.
    log_seen: usize,
}

impl App {
    fn new(
        auth: Arc<dyn AuthService>,
        session: Arc<dyn SessionStore>,
        source: Arc<dyn FeedSource>,
    ) -> Self {
        Self {
            auth: AuthUseCase::new(auth, session.clone()),
            feed: FeedUseCase::new(session.clone(), source.clone()),
            profile: ProfileUseCase::new(session, source),
            route: Route::Login,
            listing: Vec::new(),
            log_seen: 0,
        }
    }

    async fn show_terminal_log(&mut self) {
        let lines = self.auth.terminal_lines().await;
        render::terminal_lines(lines.get(self.log_seen..).unwrap_or_default());
        self.log_seen = lines.len();
    }

    /// Activates a screen. Without a usable session the login screen is
    /// shown instead; a session that cannot be read is reported first.
    async fn navigate(&mut self, route: Route) {
        let opened = match route {
            Route::Login => Ok(Access::Redirect(Route::Login)),
            Route::Feed => {
                render::info("Loading feed...");
                self.feed.open().await
            }
            Route::Profile => {
                render::info("Loading profile...");
                self.profile.open().await
            }
        };

        match opened {
            Ok(Access::Granted(_)) => {
                self.route = route;
                match route {
                    Route::Profile => self.show_profile().await,
                    _ => self.show_feed().await,
                }
            }
            Ok(Access::Redirect(target)) => {
                self.route = target;
                self.show_terminal_log().await;
            }
            Err(err) => {
                render::error(err);
                self.route = Route::Login;
                self.show_terminal_log().await;
            }
        }
    }

    /// Ends the session and returns to the login screen, even when the stored
    /// session could not be removed.
    async fn logout(&mut self) {
        match self.feed.logout().await {
            Ok(_) => render::info("Session ended."),
            Err(err) => render::error(format!("Could not clear the stored session: {}", err)),
        }
        self.listing.clear();
        self.navigate(Route::Login).await;
    }

    async fn show_feed(&mut self) {
        let posts = self.feed.visible_posts().await;
        render::posts(&posts, self.feed.filter().await);
        self.listing = posts.into_iter().map(|post| post.id).collect();
    }

    async fn show_profile(&mut self) {
        if let Some(user) = self.profile.user().await {
            render::profile(&user, self.profile.stats().await);
        }
        let posts = self.profile.posts().await;
        for (index, post) in posts.iter().enumerate() {
            render::post_entry(index + 1, post);
        }
        self.listing.clear();
    }

    /// Accepts a listing number or a raw post id.
    fn resolve_post(&self, reference: &str) -> String {
        reference
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| self.listing.get(index))
            .cloned()
            .unwrap_or_else(|| reference.to_string())
    }

    async fn login_screen(&mut self, rl: &mut Repl) -> Result<Flow> {
        let mode = self.auth.mode().await;
        let label = match mode {
            AuthMode::Login => "login",
            AuthMode::Register => "register",
        };

        let email = match read_line(rl, &format!("[{}] email: ", label), false)? {
            Input::Line(email) => email,
            Input::Interrupted => {
                ctrl_c_hint();
                return Ok(Flow::Continue);
            }
            Input::Eof => return Ok(Flow::Quit),
        };
        match Command::parse(&email) {
            Some(Command::Quit) => return Ok(Flow::Quit),
            Some(Command::Mode) => {
                let mode = self.auth.toggle_mode().await;
                render::info(format!("Switched to {} mode", mode.action()));
                return Ok(Flow::Continue);
            }
            Some(_) => {
                render::info("Log in first. '/mode' switches between login and registration.");
                return Ok(Flow::Continue);
            }
            None if email.trim().is_empty() => return Ok(Flow::Continue),
            None => {}
        }

        let username = match mode {
            AuthMode::Register => match read_line(rl, "username: ", false)? {
                Input::Line(username) => username,
                Input::Interrupted => return Ok(cancelled()),
                Input::Eof => return Ok(Flow::Quit),
            },
            AuthMode::Login => String::new(),
        };
        let password = match read_line(rl, "password: ", true)? {
            Input::Line(password) => password,
            Input::Interrupted => return Ok(cancelled()),
            Input::Eof => return Ok(Flow::Quit),
        };

        let form = match mode {
            AuthMode::Login => AuthForm::login(email.trim(), password),
            AuthMode::Register => AuthForm::register(email.trim(), username.trim(), password),
        };
        let result = self.auth.submit(&form).await;
        self.show_terminal_log().await;

        match result {
            Ok(AuthOutcome::LoggedIn { redirect, .. }) => self.navigate(redirect).await,
            Ok(AuthOutcome::Registered) => {}
            // Already written to the terminal log.
            Err(err) if err.is_auth() => {}
            Err(err) => render::error(err),
        }
        Ok(Flow::Continue)
    }

    async fn command(&mut self, rl: &mut Repl, command: Command) -> Result<Flow> {
        match (command, self.route) {
            (Command::Quit, _) => return Ok(Flow::Quit),
            (Command::Help, _) => render::help(),
            (Command::Feed, Route::Feed) => self.show_feed().await,
            (Command::Profile, Route::Profile) => self.show_profile().await,
            (Command::Feed, _) => self.navigate(Route::Feed).await,
            (Command::Profile, _) => self.navigate(Route::Profile).await,
            (Command::Logout, _) => self.logout().await,

            (Command::Filter(None), Route::Feed) => {
                let options: Vec<String> =
                    CareerFilter::options().iter().map(ToString::to_string).collect();
                render::info(format!("Careers: {}", options.join(", ")));
            }
            (Command::Filter(Some(name)), Route::Feed) => match name.parse::<CareerFilter>() {
                Ok(filter) => {
                    self.feed.filter_by_career(filter).await;
                    self.show_feed().await;
                }
                Err(_) => render::error(format!("Unknown career '{}'", name)),
            },
            (Command::Post(content), Route::Feed) => match self.feed.submit_post(&content).await {
                Ok(Some(_)) => self.show_feed().await,
                Ok(None) => render::info("Nothing to post."),
                Err(err) => render::error(err),
            },
            (Command::React(reference), Route::Feed) => {
                let post_id = self.resolve_post(&reference);
                match self.feed.react(&post_id).await {
                    Ok(count) => render::info(format!("{} reactions", count)),
                    Err(err) => render::error(err),
                }
            }
            (Command::Comments(reference), Route::Feed) => {
                let post_id = self.resolve_post(&reference);
                match self.feed.select_post(&post_id).await {
                    Ok(comments) => {
                        if let Some(post) = self.feed.post(&post_id).await {
                            render::comments(&post, &comments);
                        }
                    }
                    Err(err) => render::error(err),
                }
            }
            (Command::Comment(content), Route::Feed) => {
                match self.feed.submit_comment(&content).await {
                    Ok(Some(_)) => {
                        if let Some(post_id) = self.feed.selected_post().await
                            && let Some(post) = self.feed.post(&post_id).await
                        {
                            render::comments(&post, &self.feed.comments().await);
                        }
                    }
                    Ok(None) => {
                        render::info("Open a post with /comments first, then write something.")
                    }
                    Err(err) => render::error(err),
                }
            }

            (Command::Edit, Route::Profile) => self.edit_profile(rl).await?,
            (Command::Save, Route::Profile) => match self.profile.save_profile().await {
                Ok(_) => self.show_profile().await,
                Err(err) => render::error(err),
            },
            (Command::Cancel, Route::Profile) => match self.profile.cancel_edit().await {
                Ok(()) => render::info("Edit discarded."),
                Err(err) => render::error(err),
            },

            (Command::Unknown(name), _) => {
                render::error(format!("Unknown command {}. Try /help", name));
            }
            (_, route) => render::info(format!("Not available on {}. Try /help", route.path())),
        }
        Ok(Flow::Continue)
    }

    async fn edit_profile(&mut self, rl: &mut Repl) -> Result<()> {
        let mut draft = match self.profile.begin_edit().await {
            Ok(draft) => draft,
            Err(err) => {
                render::error(err);
                return Ok(());
            }
        };

        let prompt = format!("username [{}]: ", draft.username);
        match read_line(rl, &prompt, false)? {
            Input::Line(username) if !username.trim().is_empty() => {
                draft.username = username.trim().into()
            }
            Input::Line(_) => {}
            Input::Interrupted | Input::Eof => {
                cancelled();
                return Ok(());
            }
        }
        let prompt = format!("bio [{}]: ", draft.bio);
        match read_line(rl, &prompt, false)? {
            Input::Line(bio) if !bio.trim().is_empty() => draft.bio = bio.trim().into(),
            Input::Line(_) => {}
            Input::Interrupted | Input::Eof => {
                cancelled();
                return Ok(());
            }
        }

        match self.profile.edit_profile(draft).await {
            Ok(()) => render::info("Draft ready. /save to apply, /cancel to discard."),
            Err(err) => render::error(err),
        }
        Ok(())
    }
}

fn cancelled() -> Flow {
    render::info("Cancelled.");
    Flow::Continue
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the UT Social terminal client.
///
/// Loads the config, restores a stored session if there is one and then
/// runs the login, feed and profile screens as a REPL.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = match ConfigService::new().and_then(|service| service.get_config()) {
        Ok(config) => config,
        Err(err) => {
            render::error(format!("{}; using default settings", err));
            AppConfig::default()
        }
    };
    let session: Arc<dyn SessionStore> = match FileSessionStore::new() {
        Ok(store) => Arc::new(store),
        Err(err) => {
            render::error(format!("{}; the session will last for this run only", err));
            Arc::new(InMemorySessionStore::new())
        }
    };
    let source = Arc::new(MockFeedSource::with_latency(config.feed.mock_latency()));
    let auth = Arc::new(HttpAuthClient::from_config(&config.auth));
    tracing::debug!("Authentication service at {}", auth.base_url());

    let mut app = App::new(auth, session, source);

    let mut rl: Repl = Editor::new()?;
    rl.set_helper(Some(CliHelper::default()));

    println!("{}", "=== UT Social ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/help' for commands, '/mode' on the login prompt to register, '/quit' to exit."
            .bright_black()
    );
    println!();

    app.navigate(Route::Feed).await;

    loop {
        let flow = if app.route == Route::Login {
            app.login_screen(&mut rl).await?
        } else {
            let prompt = format!("{}> ", app.route.path());
            match read_line(&mut rl, &prompt, false)? {
                Input::Eof => Flow::Quit,
                Input::Interrupted => {
                    ctrl_c_hint();
                    Flow::Continue
                }
                Input::Line(line) => match Command::parse(&line) {
                    Some(command) => app.command(&mut rl, command).await?,
                    None if line.trim().is_empty() => Flow::Continue,
                    None => {
                        render::info("Commands start with '/'. Try /help");
                        Flow::Continue
                    }
                },
            }
        };

        if let Flow::Quit = flow {
            println!("{}", "Goodbye!".bright_green());
            break;
        }
    }

    Ok(())
}
