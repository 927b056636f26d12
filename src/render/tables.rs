use crate::targets::TableBody;

pub(super) fn fill(body: &mut TableBody, rows: impl IntoIterator<Item = Vec<String>>) {
    body.clear();
    for cells in rows {
        body.push_row(cells);
    }
}
