//! Map validated CLI matches to an [`Action`].

use crate::cli::{
    actions::{Action, Target},
    commands::{self, ARG_DSN, ARG_EMAIL, ARG_ID},
    globals::GlobalArgs,
};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use uuid::Uuid;

/// # Errors
/// Returns an error if required arguments are missing or malformed.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let mut globals = GlobalArgs::new(commands::digest::parse(matches)?);
    if let Some(dsn) = matches.get_one::<String>(ARG_DSN) {
        globals.set_dsn(SecretString::from(dsn.clone()));
    }

    let (name, sub) = matches
        .subcommand()
        .context("missing subcommand")?;

    let requires_store = !matches!(name, "hash");
    if requires_store && globals.dsn.is_none() {
        return Err(anyhow!("missing required argument: --{ARG_DSN}"));
    }

    let target = |sub: &clap::ArgMatches| -> Result<Target> {
        let id = sub
            .get_one::<String>(ARG_ID)
            .context("missing required argument: --id")?;
        let id = Uuid::parse_str(id).with_context(|| format!("invalid account id: {id}"))?;
        Ok(Target {
            globals: globals.clone(),
            id,
        })
    };

    match name {
        "hash" => Ok(Action::Hash(globals.clone())),
        "schema" => Ok(Action::Schema(globals.clone())),
        "create" => Ok(Action::Create {
            email: sub
                .get_one::<String>(ARG_EMAIL)
                .cloned()
                .context("missing required argument: --email")?,
            globals: globals.clone(),
        }),
        "verify" => Ok(Action::Verify(target(sub)?)),
        "status" => Ok(Action::Status(target(sub)?)),
        "update" => Ok(Action::Update(target(sub)?)),
        other => Err(anyhow!("unknown subcommand: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "0190a5c4-5b7e-7b1e-9c59-0f3c2b8d6a11";

    fn dispatch(args: &[&str]) -> Result<Action> {
        let matches = commands::new().try_get_matches_from(args)?;
        handler(&matches)
    }

    #[test]
    fn hash_does_not_need_dsn() {
        temp_env::with_vars([("PASVORTO_DSN", None::<&str>)], || {
            assert!(matches!(
                dispatch(&["pasvorto", "hash"]),
                Ok(Action::Hash(_))
            ));
        });
    }

    #[test]
    fn store_commands_need_dsn() {
        temp_env::with_vars([("PASVORTO_DSN", None::<&str>)], || {
            let err = dispatch(&["pasvorto", "status", "--id", ID]).err();
            assert!(err.is_some_and(|err| err.to_string().contains("--dsn")));
        });
    }

    #[test]
    fn update_parses_id() {
        temp_env::with_vars(
            [("PASVORTO_DSN", Some("postgres://localhost/pasvorto"))],
            || match dispatch(&["pasvorto", "update", "--id", ID]) {
                Ok(Action::Update(target)) => {
                    assert_eq!(target.id.to_string(), ID);
                    assert!(target.globals.dsn.is_some());
                }
                other => panic!("unexpected dispatch result: {other:?}"),
            },
        );
    }

    #[test]
    fn invalid_id_is_rejected() {
        temp_env::with_vars(
            [("PASVORTO_DSN", Some("postgres://localhost/pasvorto"))],
            || {
                let err = dispatch(&["pasvorto", "verify", "--id", "nope"]).err();
                assert!(err.is_some_and(|err| err.to_string().contains("invalid account id")));
            },
        );
    }

    #[test]
    fn create_takes_email() {
        temp_env::with_vars(
            [("PASVORTO_DSN", Some("postgres://localhost/pasvorto"))],
            || match dispatch(&["pasvorto", "create", "--email", "user@example.com"]) {
                Ok(Action::Create { email, .. }) => assert_eq!(email, "user@example.com"),
                other => panic!("unexpected dispatch result: {other:?}"),
            },
        );
    }
}
