use crate::ad::Ad;

/// One entry of the merged single-column feed.
#[derive(Debug, PartialEq)]
pub enum FeedItem<'a, C> {
    Content(&'a C),
    Ad(&'a Ad),
}

/// Merges a content list and the large-ad pool into one ordered feed for
/// narrow layouts.
///
/// Deterministic in `(content.len(), pool.len(), indices)`:
/// - no content, no feed (ads only accompany content here);
/// - one item is framed by an ad on each side;
/// - two items each get an ad after them;
/// - three or more items get one ad after every completed pair of items
///   except the last item overall, round-robining over the two current
///   indices.
pub fn interleave<'a, C>(
    content: &'a [C],
    pool: &'a [Ad],
    indices: [usize; 2],
) -> Vec<FeedItem<'a, C>> {
    let mut feed = Vec::new();
    let ad_at = |at: usize| pool.get(indices[at % 2]).map(FeedItem::Ad);

    match content.len() {
        0 => {}
        1 => {
            if !pool.is_empty() {
                feed.extend(ad_at(0));
            }
            feed.push(FeedItem::Content(&content[0]));
            if pool.len() > 1 {
                feed.extend(ad_at(1));
            }
        }
        2 => {
            // An ad after each item; a single-ad pool repeats it.
            feed.push(FeedItem::Content(&content[0]));
            if !pool.is_empty() {
                feed.extend(ad_at(0));
            }
            feed.push(FeedItem::Content(&content[1]));
            if !pool.is_empty() {
                feed.extend(ad_at(1));
            }
        }
        len => {
            let mut insertions = 0;
            for (at, item) in content.iter().enumerate() {
                feed.push(FeedItem::Content(item));
                let pair_completed = at % 2 == 1;
                let is_last = at == len - 1;
                if pair_completed && !is_last && !pool.is_empty() {
                    feed.extend(ad_at(insertions));
                    insertions += 1;
                }
            }
        }
    }

    feed
}
