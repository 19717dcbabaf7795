/// CSV export of report cost rows.
pub mod export;
