use crate::domain::draw::DrawRecord;
use crate::domain::result::FormattedResult;

pub fn format_result(record: DrawRecord, peso_sign: bool) -> FormattedResult {
    FormattedResult {
        jackpot_display: record.jackpot.display(peso_sign),
        game: record.game,
        date: record.date,
        numbers: record.numbers,
        winners: record.winners,
    }
}

pub fn format_results(records: Vec<DrawRecord>, peso_sign: bool) -> Vec<FormattedResult> {
    records
        .into_iter()
        .map(|r| format_result(r, peso_sign))
        .collect()
}
