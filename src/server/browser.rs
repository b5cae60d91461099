// Browser launch module
// Opening the browser goes through a trait so tests can observe the call

use std::io;

/// Something that can show a URL to the developer
pub trait BrowserLauncher {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// The host's default web browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        // Detached so a slow launcher never delays the serve loop
        open::that_detached(url)
    }
}
