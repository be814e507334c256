// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// The query used when a card's query is empty or unknown.
pub const FALLBACK_QUERY: &str = "japanese archery";

const UNSPLASH: &str = "https://images.unsplash.com/photo-";
const MARACHARLIE: &str = "https://img.maracharlie.com/";

/// Where an image lives: an Unsplash photo id or a file on the project's
/// image host.
enum Source {
    Unsplash(&'static str),
    Hosted(&'static str),
}

#[rustfmt::skip]
const IMAGES: &[(&str, Source)] = &[
    ("japanese archery", Source::Unsplash("1759353296514-a656159d708a")),
    ("japanese bow yumi", Source::Hosted("japanese_bow_yumi.jpg")),
    ("japanese arrow", Source::Hosted("japanese_arrow.jpg")),
    ("archery target", Source::Unsplash("1485802240079-a8245c843b95")),
    ("kyudo dojo", Source::Unsplash("1632653223454-ca18a3777b41")),
    ("kyudo shooting range", Source::Unsplash("1750790774010-a5ccea3b855a")),
    ("kyudo posture", Source::Unsplash("1699787167971-db840f61c3bd")),
    ("feet stance archery", Source::Unsplash("1741790053537-c34a2e90ed40")),
    ("posture stance", Source::Unsplash("1513266913343-a1bfd2ffd806")),
    ("yugamae", Source::Hosted("yugamae.png")),
    ("ichiokoshi", Source::Hosted("uchiokoshi.png")),
    ("hikiwake", Source::Hosted("hikiwake.png")),
    ("kai", Source::Hosted("kai.png")),
    ("arrow release", Source::Unsplash("1499887263958-159e6036b53d")),
    ("zanshin", Source::Hosted("zanshin.png")),
    ("japanese bow respect", Source::Unsplash("1716524830848-a5d1c1056aaa")),
    ("breathing meditation", Source::Unsplash("1716284129276-c84a6b77325f")),
    ("martial arts spirit", Source::Unsplash("1529630218527-7df22fc2d4ee")),
    ("zen archery", Source::Unsplash("1664811581329-5f999b7d7450")),
    ("kyudo glove", Source::Unsplash("1579178937321-3ac1437a28ae")),
    ("hakama traditional", Source::Unsplash("1544388762-2741b4d86c1d")),
    ("japanese obi belt", Source::Unsplash("1758229484027-03ed976417f5")),
    ("arrow feathers", Source::Unsplash("1759502330400-f2820f8c3088")),
    ("arrow nock", Source::Hosted("arrow_nock.png")),
    ("arrow nock detail", Source::Unsplash("1755418486388-2605c7128aa2")),
    ("bow string", Source::Unsplash("1586739413532-7f7e0e673573")),
    ("thumb pressure archery", Source::Unsplash("1748616574632-0f3017a5f58c")),
    ("hand grip bow", Source::Unsplash("1578339123566-7c37486d5046")),
    ("bow rotation archery", Source::Unsplash("1689794500548-ec0663c50526")),
    ("arrow trajectory", Source::Unsplash("1622142370000-00d99a574b26")),
    ("kyudo ceremony", Source::Unsplash("1563021482-00a3ffc719ce")),
    ("kyudo lineup", Source::Unsplash("1668392296954-5b2353d1b17a")),
    ("bullseye target", Source::Unsplash("1643538034773-3055040a8981")),
    ("missed target", Source::Unsplash("1594652634010-275456c808d0")),
    ("straw target archery", Source::Unsplash("1742641849162-174c281af15e")),
    ("shooting position", Source::Unsplash("1702294186136-d9b015e6693b")),
    ("archer position", Source::Unsplash("1562008752-2459495a0c05")),
    ("before target archery", Source::Unsplash("1654281700092-13c56ee48fc5")),
    ("kyudo ceremony ritual", Source::Unsplash("1752146506745-75d39c869980")),
    ("dojo entrance", Source::Unsplash("1549963214-775caabc89e3")),
    ("dojo exit", Source::Unsplash("1577606969930-d61d40af13c6")),
    ("martial arts ranking", Source::Unsplash("1550759807-50dc0b381a1e")),
    ("martial arts master", Source::Unsplash("1686729917714-ced212e45227")),
    ("beginner student", Source::Unsplash("1673515334462-8ec684bd664b")),
    ("martial arts training", Source::Unsplash("1725813961320-151288b4c4db")),
];

fn lookup(query: &str) -> Option<&'static Source> {
    IMAGES
        .iter()
        .find(|(key, _)| *key == query)
        .map(|(_, source)| source)
}

/// Whether the query names a known image.
#[cfg(test)]
pub fn has_image(query: &str) -> bool {
    lookup(query).is_some()
}

/// Resolve an image query to a URL. Unknown queries resolve to the image of
/// `FALLBACK_QUERY`.
pub fn resolve_image(query: &str) -> String {
    let source = lookup(query.trim()).or_else(|| lookup(FALLBACK_QUERY));
    match source {
        Some(Source::Unsplash(id)) => {
            format!("{UNSPLASH}{id}?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&q=80&w=1080")
        }
        Some(Source::Hosted(file)) => format!("{MARACHARLIE}{file}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_query() {
        assert_eq!(resolve_image("kai"), "https://img.maracharlie.com/kai.png");
        assert!(resolve_image("kyudo dojo").contains("1632653223454-ca18a3777b41"));
    }

    #[test]
    fn test_fallback() {
        let fallback = resolve_image(FALLBACK_QUERY);
        assert!(fallback.starts_with(UNSPLASH));
        assert_eq!(resolve_image(""), fallback);
        assert_eq!(resolve_image("no such image"), fallback);
    }

    #[test]
    fn test_query_is_trimmed() {
        assert_eq!(resolve_image(" zanshin "), resolve_image("zanshin"));
    }
}
