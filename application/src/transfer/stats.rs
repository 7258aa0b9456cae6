/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsDto {
    pub total_books: usize,
    pub available_books: usize,
    pub borrowed_books: usize,
    pub total_users: usize,
}
