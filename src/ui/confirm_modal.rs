//! Confirmation prompt for destructive booking deletion.
//!
//! The modal is a pure, controlled component: it renders markup from its
//! props and exposes `data-action` hooks the hosting page wires to the
//! delete action and its close handling. It holds no state and performs no
//! network access; it only signals user intent.

/// Controlled confirmation dialog for deleting a set of bookings.
#[derive(Debug, Clone)]
pub struct ConfirmDeleteModal {
    /// Whether the dialog is visible; a closed dialog renders nothing.
    pub open: bool,
    /// Number of bookings selected for deletion, used to pluralize the
    /// prompt.
    pub count: usize,
}

impl ConfirmDeleteModal {
    /// The prompt text, pluralized on the selection count.
    pub fn message(&self) -> String {
        if self.count == 1 {
            "Are you sure you want to delete 1 booking? This cannot be undone.".to_string()
        } else {
            format!(
                "Are you sure you want to delete {} bookings? This cannot be undone.",
                self.count
            )
        }
    }

    /// Renders the modal markup, or `None` while closed.
    ///
    /// The backdrop carries the cancel hook, and the inner panel stops
    /// click propagation so a click inside it never reaches the backdrop
    /// handler.
    pub fn render(&self) -> Option<String> {
        if !self.open {
            return None;
        }
        Some(format!(
            concat!(
                r#"<div class="modal-backdrop" data-action="cancel">"#,
                r#"<div class="modal-panel" onclick="event.stopPropagation()">"#,
                r#"<h2 class="modal-title">Confirm deletion</h2>"#,
                r#"<p class="modal-message">{message}</p>"#,
                r#"<div class="modal-actions">"#,
                r#"<button type="button" class="modal-cancel" data-action="cancel">Cancel</button>"#,
                r#"<button type="button" class="modal-confirm danger" data-action="confirm">Delete</button>"#,
                r#"</div>"#,
                r#"</div>"#,
                r#"</div>"#
            ),
            message = self.message()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_modal_renders_nothing() {
        let modal = ConfirmDeleteModal {
            open: false,
            count: 3,
        };
        assert!(modal.render().is_none());
    }

    #[test]
    fn message_pluralizes_on_count() {
        let one = ConfirmDeleteModal {
            open: true,
            count: 1,
        };
        assert_eq!(
            one.message(),
            "Are you sure you want to delete 1 booking? This cannot be undone."
        );

        let several = ConfirmDeleteModal {
            open: true,
            count: 4,
        };
        assert_eq!(
            several.message(),
            "Are you sure you want to delete 4 bookings? This cannot be undone."
        );
    }

    #[test]
    fn backdrop_carries_the_cancel_hook() {
        let html = ConfirmDeleteModal {
            open: true,
            count: 2,
        }
        .render()
        .expect("open modal renders");
        assert!(html.starts_with(r#"<div class="modal-backdrop" data-action="cancel">"#));
        assert!(html.contains(r#"data-action="confirm""#));
    }

    #[test]
    fn panel_stops_click_propagation() {
        let html = ConfirmDeleteModal {
            open: true,
            count: 2,
        }
        .render()
        .expect("open modal renders");
        assert!(html.contains(r#"onclick="event.stopPropagation()""#));
    }
}
