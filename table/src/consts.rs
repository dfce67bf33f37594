pub const SEAT_COUNT: usize = 2;

pub const GUESS_LIMIT: u32 = 3;
pub const CORRECT_GUESS_POINTS: i32 = 10;

pub const HB_DURATION: tokio::time::Duration = tokio::time::Duration::from_secs(10);

pub const PORT: u16 = 9000;

pub const WORD_LIST_URL: &str = "https://www.mit.edu/~ecprice/wordlist.10000";
