use goose::prelude::*;
use shop_models::{User, paths};

use super::{Body, NO_BODY, pause, rejection, send, session};
use crate::{faker, session::SessionToken};

/// Registers a freshly faked user. A rejection fails the transaction and
/// leaves the session anonymous.
pub async fn register(user: &mut GooseUser) -> TransactionResult {
    let account = faker::user(&mut rand::rng());
    let request = account.register_request();
    let mut goose = send(
        user,
        GooseMethod::Post,
        paths::REGISTER,
        "register",
        Body::Json(&request),
    )
    .await?;
    if let Some(tag) = rejection(&goose, "register") {
        session(user).logout();
        return user.set_failure(&tag, &mut goose.request, None, None);
    }
    session(user).register(account);
    Ok(())
}

/// Logs the stored user in, registering one first when there is none.
pub async fn login(user: &mut GooseUser) -> TransactionResult {
    if session(user).user().is_none() {
        pause().await;
        register(user).await?;
    }
    let Some(request) = session(user).user().map(User::login_request) else {
        return Ok(());
    };
    let mut goose = send(
        user,
        GooseMethod::Post,
        paths::LOGIN,
        "login",
        Body::Json(&request),
    )
    .await?;
    if let Some(tag) = rejection(&goose, "login") {
        return user.set_failure(&tag, &mut goose.request, None, None);
    }

    let token = goose.response.as_ref().ok().and_then(|r| {
        r.headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(SessionToken::from_set_cookie)
    });
    let Some(token) = token else {
        return user.set_failure(
            "login response carried no session cookie",
            &mut goose.request,
            None,
            None,
        );
    };
    if let Err(e) = session(user).authenticate(token) {
        return user.set_failure(&e.to_string(), &mut goose.request, None, None);
    }
    Ok(())
}

/// Ends the server session (if any) and drops all cached state.
pub async fn logout(user: &mut GooseUser) -> TransactionResult {
    if session(user).is_authenticated() {
        let _ = send(user, GooseMethod::Post, paths::LOGOUT, "logout", NO_BODY)
            .await;
    }
    session(user).logout();
    Ok(())
}
