// cocoadiag state managers
// Managers own persisted state: the diagnosis history log.

pub mod history_manager;
