use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

impl<T> PaginatedResponse<T> {
    pub const DEFAULT_LIMIT: usize = 50;

    /// Slice an already-fetched list the way the live endpoints page their results.
    pub fn paginate(all: Vec<T>, limit: Option<usize>, offset: Option<usize>) -> Self {
        let total = all.len();

        let offset = offset.unwrap_or(0).min(total);
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);
        let end = (offset + limit).min(total);

        let items = all
            .into_iter()
            .skip(offset)
            .take(end.saturating_sub(offset))
            .collect();

        PaginatedResponse {
            items,
            total,
            limit: end.saturating_sub(offset),
            offset,
        }
    }
}
