use stresstea::error::AppResult;

fn main() -> AppResult<()> {
    stresstea::entry::run()
}
