use anyhow::Result;
use weekgrid_core::AgendaDir;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // We reload the agenda directory on each request to pick up
    // filesystem changes made by the CLI while the server runs
}

impl AppState {
    pub fn new() -> Result<Self> {
        // Verify the agenda directory can be loaded at startup
        let _ = AgendaDir::load()?;
        Ok(AppState {})
    }

    pub fn agendas(&self) -> Result<AgendaDir> {
        Ok(AgendaDir::load()?)
    }
}
