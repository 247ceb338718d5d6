use super::user_error;
use crate::app::App;
use crate::console::Output;
use crate::render;
use anyhow::Result;

pub async fn ask(app: &App, out: Output, question: &str) -> Result<()> {
    let reply = app.chat.ask(question).await.map_err(user_error)?;
    out.emit(&reply, render::chat_reply(&reply))
}

pub fn opacity(app: &App, out: Output, value: Option<i64>) -> Result<()> {
    let current = match value {
        Some(value) => app.chat.set_opacity(value).map_err(user_error)?,
        None => app.chat.opacity(),
    };
    out.emit(&current, vec![format!("chat opacity {}%", current)])
}
