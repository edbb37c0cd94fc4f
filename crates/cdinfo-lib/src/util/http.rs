use crate::cddb::constants::CONNECT_TIMEOUT;
use crate::cddb::error::CddbResult;
use lazy_static::lazy_static;
use reqwest::Client;
use std::time::Duration;

pub const USER_AGENT: &str = concat!("cdinfo/", env!("CARGO_PKG_VERSION"));

lazy_static! {
    pub static ref CLIENT: Client = Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .unwrap();
}

/// Hands out the shared [`CLIENT`] for the default timeout, any other timeout gets its own.
pub fn client_for(connect_timeout: Duration) -> CddbResult<Client> {
    if connect_timeout == CONNECT_TIMEOUT {
        return Ok(CLIENT.clone());
    }

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(connect_timeout)
        .build()?;

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_clients_for_default_and_custom_timeouts() {
        assert!(client_for(CONNECT_TIMEOUT).is_ok());
        assert!(client_for(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn user_agent_names_the_crate_version() {
        assert_eq!(USER_AGENT, format!("cdinfo/{}", env!("CARGO_PKG_VERSION")));
    }
}
