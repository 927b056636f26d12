use crate::models::{Kpis, format_number};
use crate::targets::{Slot, TextSlots};

pub(super) fn bind(slots: &mut TextSlots, kpis: &Kpis) {
    let plain = |value: Option<f64>| format_number(value.unwrap_or(0.0));

    slots.set_text(Slot::Total, plain(kpis.total));
    slots.set_text(Slot::Approved, plain(kpis.approved));
    slots.set_text(Slot::Deals, plain(kpis.deals));
    slots.set_text(Slot::Reps, plain(kpis.reps));
    slots.set_text(Slot::Conversion, format!("{}%", plain(kpis.conversion)));
    slots.set_text(Slot::Clients, plain(kpis.clients));
    slots.set_text(Slot::Upcoming, plain(kpis.upcoming));
    slots.set_text(Slot::RepTotal, format!("{} visits", plain(kpis.by_rep_total)));
}
