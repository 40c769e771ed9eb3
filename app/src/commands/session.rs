use std::io::Write;

use crate::error::AppResult;
use crate::AppState;

pub fn login<W: Write>(state: &mut AppState, email: &str, pin: &str, out: &mut W) -> AppResult<()> {
    let user = state.auth().login(email, pin)?;
    writeln!(out, "Bienvenido, {}", user.name)?;
    state.session.start(user)
}

pub fn logout<W: Write>(state: &mut AppState, out: &mut W) -> AppResult<()> {
    state.session.end()?;
    writeln!(out, "Sesión cerrada")?;
    Ok(())
}

pub fn whoami<W: Write>(state: &AppState, out: &mut W) -> AppResult<()> {
    match state.session.user() {
        Some(user) => writeln!(out, "{} <{}>", user.name, user.email)?,
        None => writeln!(out, "No has iniciado sesión")?,
    }
    Ok(())
}
