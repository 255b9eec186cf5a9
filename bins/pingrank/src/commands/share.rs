//! Share command - SMS deep link for the app

use crate::context::Context;
use anyhow::Result;
use pingrank_core::share::{share_message, sms_link};

/// Run the share command
pub fn run(ctx: &Context, phone: &str, url: Option<&str>) -> Result<()> {
    let message = share_message(ctx.app_url(url));
    println!("{}", sms_link(phone, &message)?);
    Ok(())
}
