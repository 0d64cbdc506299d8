//! Authentication and session management for the TD Ameritrade API.
//!
//! The API uses OAuth2 with a short-lived access token (~30 minutes) and a
//! long-lived refresh token (~90 days). The first token pair is obtained out
//! of band and written to a credential file; from then on
//! [`AuthenticatedSession`] keeps it fresh:
//!
//! 1. every request carries `Authorization: Bearer <access_token>`
//! 2. a `401` triggers a refresh-token exchange against `/v1/oauth2/token`
//! 3. the returned fields are merged into the [`CredentialSet`] and written
//!    back to the [`CredentialStore`]
//! 4. the original request is sent once more
//!
//! ```no_run
//! use tdameritrade_rs::auth::{AuthenticatedSession, CredentialStore, RequestOptions};
//! use reqwest::Method;
//! use url::Url;
//!
//! # async fn example() -> tdameritrade_rs::Result<()> {
//! let session = AuthenticatedSession::new(
//!     reqwest::Client::new(),
//!     CredentialStore::new("td_credentials.json"),
//!     "MYAPPKEY",
//!     Url::parse("https://api.tdameritrade.com/v1/oauth2/token")?,
//! )?;
//!
//! let response = session
//!     .send(
//!         Method::GET,
//!         "https://api.tdameritrade.com/v1/marketdata/quotes",
//!         &RequestOptions::new().query("symbol", "GME"),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod credentials;
mod exchange;
mod session;
mod store;

pub use credentials::{CredentialSet, CredentialUpdate};
pub use exchange::{GrantType, TokenRequest};
pub use session::{AuthenticatedSession, RequestOptions};
pub use store::CredentialStore;
