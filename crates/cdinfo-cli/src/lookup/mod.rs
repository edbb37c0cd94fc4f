use crate::commands::Cli;
use crate::error::{CliError, CliResult};
use crate::output;
use cdinfo_lib::cddb::transport::Transport;
use cdinfo_lib::cddb::{
    CddbClient, CddbConfig, CddbResult, MatchCandidate, TransportKind, WebEntryReader, fetch_all,
};
use cdinfo_lib::fingerprint::DiscFingerprint;
use cdinfo_lib::toc::models::DiscToc;
use cdinfo_lib::toc::{OffsetsToc, TocSource};
use indicatif::{MultiProgress, ProgressBar};
use log::{debug, warn};
use std::time::Duration;

pub async fn run(cli: &Cli, multi: &MultiProgress) -> CliResult<()> {
    let toc = read_toc(cli)?;
    let fingerprint = DiscFingerprint::from_toc(&toc);

    debug!("Disc {fingerprint} has {} tracks", toc.track_count());

    if cli.verbose > 0 {
        output::print_toc(&toc, &fingerprint);
    }

    let config = cli.cddb_config(cli.identity());
    debug!(
        "Using {:?} transport on {}:{}",
        config.transport, config.server, config.port
    );

    match config.transport {
        TransportKind::Socket => lookup(CddbClient::socket(&config), &toc, &config, cli, multi).await,
        TransportKind::Http => {
            let client =
                CddbClient::http(&config).map_err(|err| CliError::cddb(&config.server, err))?;
            lookup(client, &toc, &config, cli, multi).await
        }
    }
}

fn read_toc(cli: &Cli) -> CliResult<DiscToc> {
    if cli.test {
        return Ok(OffsetsToc::test_disc().read_toc()?);
    }

    drive_toc(&cli.device)
}

#[cfg(feature = "drive")]
fn drive_toc(device: &str) -> CliResult<DiscToc> {
    Ok(cdinfo_lib::toc::DriveToc::new(device).read_toc()?)
}

#[cfg(not(feature = "drive"))]
fn drive_toc(device: &str) -> CliResult<DiscToc> {
    debug!("Cannot read {device}, built without drive support");
    Err(cdinfo_lib::toc::error::TocError::DriveUnsupported.into())
}

async fn lookup<T: Transport>(
    mut client: CddbClient<T>,
    toc: &DiscToc,
    config: &CddbConfig,
    cli: &Cli,
    multi: &MultiProgress,
) -> CliResult<()> {
    let progress = spinner(multi, format!("Querying {}", config.server));
    let matches = query(&mut client, toc).await;
    progress.finish_and_clear();

    let matches = matches.map_err(|err| CliError::cddb(&config.server, err))?;
    output::print_matches(&matches);

    if cli.long && !matches.is_empty() {
        let progress = spinner(multi, format!("Reading {} entries", matches.len()));

        let outcomes = if cli.use_web_read(config) {
            let mut reader = WebEntryReader::new(&config.web_server, config.connect_timeout)
                .map_err(|err| CliError::cddb(&config.web_server, err))?;
            fetch_all(&mut reader, &matches, config.fetch_delay).await
        } else {
            client.fetch_all(&matches, config.fetch_delay).await
        };

        progress.finish_and_clear();
        output::print_outcomes(&outcomes);
    }

    if let Err(err) = client.quit().await {
        warn!("Failed to close the session with {}: {err}", config.server);
    }

    Ok(())
}

async fn query<T: Transport>(
    client: &mut CddbClient<T>,
    toc: &DiscToc,
) -> CddbResult<Vec<MatchCandidate>> {
    client.connect().await?;
    client.query(toc).await
}

fn spinner(multi: &MultiProgress, message: String) -> ProgressBar {
    let pb = multi.add(ProgressBar::new_spinner());
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
