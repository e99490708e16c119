use indicatif::{ProgressBar, ProgressStyle};
use std::{future::Future, path::PathBuf, time::Duration};
use tracing::{debug, info};
use ustvnow::{
    Channel, ClientOptions, ManifestFetcher, ProxyConfig, SessionClient, SessionToken,
    create_client, group_by_quality,
};

use crate::{
    cli::{Args, WatchArgs},
    config::AppConfig,
    error::Result,
    output::{OutputManager, channel_table, default_filename, indent},
    player, prompt,
};

pub struct CommandExecutor {
    config: AppConfig,
    session: SessionClient,
    fetcher: ManifestFetcher,
    out: OutputManager,
    verbose: bool,
}

impl CommandExecutor {
    /// Build the HTTP client and API clients, command-line flags taking
    /// precedence over configuration.
    pub fn new(config: AppConfig, args: &Args) -> Result<Self> {
        let proxy = args
            .proxy
            .clone()
            .or_else(|| config.proxy.clone())
            .map(|url| ProxyConfig {
                url,
                username: args
                    .proxy_username
                    .clone()
                    .or_else(|| config.proxy_username.clone()),
                password: args
                    .proxy_password
                    .clone()
                    .or_else(|| config.proxy_password.clone()),
            });

        let mut options = ClientOptions {
            timeout: Duration::from_secs(args.timeout.unwrap_or(config.timeout)),
            proxy,
            ..ClientOptions::default()
        };
        if let Some(user_agent) = &config.user_agent {
            options.user_agent = user_agent.clone();
        }

        let client = create_client(&options)?;
        let base_url = args.base_url.as_deref().unwrap_or(&config.base_url);
        let session = SessionClient::with_base_url(client.clone(), base_url)?;

        Ok(Self {
            out: OutputManager::new(config.colored_output),
            fetcher: ManifestFetcher::new(client),
            session,
            verbose: args.verbose,
            config,
        })
    }

    /// Log in, pick channel and quality, write the filtered playlist and
    /// optionally hand it to a player.
    pub async fn watch(&self, args: &WatchArgs) -> Result<()> {
        let (token, channels) = self.login_and_list(args).await?;

        let code = prompt::channel_code(&self.out, &channels, args.channel.as_deref())?;
        let url = self
            .run_step(
                "Retrieving channel playlist URL...",
                self.session.resolve_stream_url(&token, &code),
            )
            .await?;
        if self.verbose {
            self.out
                .detail(&format!("Got playlist URL (for channel {code}): {url}"));
        }

        let manifest = self
            .run_step("Retrieving channel playlist...", self.fetcher.fetch(&url))
            .await?;
        let groups = group_by_quality(&manifest);
        if self.verbose {
            self.out
                .detail(&format!("Got playlists by quality (for channel {code}):"));
            for group in &groups {
                println!("{}", indent(&group.to_string(), 6));
            }
        }

        let group = prompt::quality(&self.out, &groups, args.quality)?;
        let bandwidth = group.key.bandwidth;
        let playlist = manifest.assemble_subset(&group.variants)?;
        if self.verbose {
            self.out.detail("Created output m3u8 data:");
            println!("{}", indent(&playlist, 6));
        }

        let path = self.output_path(args, &code, bandwidth);
        let path = prompt::output_path(&self.out, path, args.yes)?;
        std::fs::write(&path, playlist.as_bytes())?;
        self.out.step(&format!(
            "Wrote channel playlist as '{}'.",
            path.display()
        ));
        info!("Wrote {} ({} variants)", path.display(), group.variants.len());

        if !args.download_only {
            self.out.step(&format!("Opening '{}'...", path.display()));
            let player = args.player.as_deref().or(self.config.player.as_deref());
            player::open(&path, player)?;
        }

        Ok(())
    }

    /// Print the channel directory of the account.
    pub async fn channels(&self, args: &WatchArgs, json: bool) -> Result<()> {
        let (_, channels) = self.login_and_list(args).await?;
        if json {
            println!("{}", serde_json::to_string_pretty(&channels)?);
        } else {
            println!("{}", channel_table(&channels));
        }
        Ok(())
    }

    async fn login_and_list(&self, args: &WatchArgs) -> Result<(SessionToken, Vec<Channel>)> {
        let username = args.username.clone().or_else(|| self.config.username.clone());
        let (username, password) =
            prompt::credentials(&self.out, username, args.password.clone())?;

        let token = self
            .run_step(
                "Logging in...",
                self.session.authenticate(&username, &password),
            )
            .await?;
        if self.verbose {
            self.out.detail(&format!("Got token: {}", token.expose()));
        }

        let channels = self
            .run_step(
                "Retrieving channel list...",
                self.session.list_channels(&token),
            )
            .await?;
        let available = channels.iter().filter(|c| c.available).count();
        if self.verbose {
            self.out.detail(&format!(
                "Got channel data ({available} available, {} total):",
                channels.len()
            ));
            println!("{}", indent(&channel_table(&channels), 6));
        } else {
            self.out.detail(&format!(
                "Got {available} available channels ({} total).",
                channels.len()
            ));
        }

        Ok((token, channels))
    }

    fn output_path(&self, args: &WatchArgs, code: &str, bandwidth: u64) -> PathBuf {
        match (&args.output_filename, &self.config.output_dir) {
            (Some(path), _) => path.clone(),
            (None, Some(dir)) => dir.join(default_filename(code, bandwidth)),
            (None, None) => PathBuf::from(default_filename(code, bandwidth)),
        }
    }

    /// Await one network call behind a spinner.
    async fn run_step<T>(
        &self,
        message: &str,
        call: impl Future<Output = ustvnow::Result<T>>,
    ) -> Result<T> {
        let pb = self.create_progress_bar(message);
        let result = call.await;
        pb.finish_and_clear();

        match &result {
            Ok(_) => self.out.step(&format!("{message} done.")),
            Err(e) => debug!("{message} failed: {e}"),
        }
        Ok(result?)
    }

    fn create_progress_bar(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(120));
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
        }
        pb.set_message(message.to_string());
        pb
    }
}
