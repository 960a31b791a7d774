/// This module provides the typed CSV row reader and its cursors.
pub mod csv;
