// Small dataset loaded into an in-memory database for
// tests. Article 2 purposely has no comments.
use eyre::WrapErr;
use r2d2_sqlite::SqliteConnectionManager;
use super::{enable_foreign_keys, init_schema, Pool};

const SEED: &str = "
INSERT INTO topics (slug, description) VALUES
  ('mitch', 'The man, the Mitch, the legend'),
  ('cats', 'Not dogs'),
  ('paper', 'what books are made of');

INSERT INTO users (username, name, avatar_url) VALUES
  ('butter_bridge', 'jonny', 'https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg'),
  ('icellusedkars', 'sam', 'https://avatars2.githubusercontent.com/u/24604688?s=460&v=4'),
  ('rogersop', 'paul', 'https://avatars2.githubusercontent.com/u/24394918?s=400&v=4'),
  ('lurker', 'do_nothing', 'https://www.golenbock.com/wp-content/uploads/2015/01/placeholder-user.png');

INSERT INTO articles (article_id, title, topic, author, body, created_at, votes, article_img_url) VALUES
  (1, 'Living in the shadow of a great man', 'mitch', 'butter_bridge', 'I find this existence challenging', 1594329060, 100, 'https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700'),
  (2, 'Sony Vaio; or, The Laptop', 'mitch', 'icellusedkars', 'Call me Mitchell.', 1602828180, 0, 'https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700'),
  (3, 'Eight pug gifs that remind me of mitch', 'mitch', 'icellusedkars', 'some gifs', 1604394720, 0, 'https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700'),
  (4, 'UNCOVERED: catspiracy to bring down democracy', 'cats', 'rogersop', 'Bastet walks amongst us, and the cats are taking arms!', 1596464040, 0, 'https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700'),
  (5, 'A', 'mitch', 'icellusedkars', 'Delicious tin of cat food', 1588731240, 0, 'https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700');

INSERT INTO comments (comment_id, body, article_id, author, votes, created_at) VALUES
  (1, 'Oh, I''ve got compassion running out of my nose, pal!', 1, 'butter_bridge', 16, 1586179020),
  (2, 'The beautiful thing about treasure is that it exists.', 1, 'butter_bridge', 14, 1604113380),
  (3, 'Replacing the quiet elegance of the dark suit and tie.', 1, 'icellusedkars', 100, 1583025180),
  (4, 'I hate streaming noses', 3, 'icellusedkars', 0, 1604437200),
  (5, 'What do you see? I have no idea where this will lead us.', 3, 'icellusedkars', 0, 1600560600),
  (6, 'git push origin master', 4, 'rogersop', 0, 1592641440);
";

// In-memory databases are per connection, so there can
// be only one of them in the pool.
fn memory_pool() -> color_eyre::Result<Pool> {
  let manager = SqliteConnectionManager::memory()
    .with_init(enable_foreign_keys);
  r2d2::Pool::builder()
    .max_size(1)
    .build(manager)
    .context("Opening in-memory database")
}

pub fn seeded_pool() -> Pool {
  let pool = memory_pool().unwrap();
  init_schema(&pool).unwrap();
  pool.get().unwrap().execute_batch(SEED).unwrap();
  pool
}
