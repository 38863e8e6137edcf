//! The "classified files" feed: a fixed set of short articles rendered by the
//! frontend. `content` is an HTML fragment; `redacted` spans are styled by
//! the client.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedFile {
    pub id: &'static str,
    pub title: &'static str,
    pub status: &'static str,
    #[serde(rename = "statusClass")]
    pub status_class: &'static str,
    pub date: &'static str,
    pub origin: &'static str,
    pub content: &'static str,
}

pub fn classified_files() -> Vec<ClassifiedFile> {
    vec![
        ClassifiedFile {
            id: "wow-signal",
            title: "INCIDENT 1977: THE WOW! SIGNAL",
            status: "UNSOLVED",
            status_class: "status-yellow",
            date: "August 15, 1977",
            origin: "Sagittarius Constellation",
            content: concat!(
                "<p>On August 15, 1977, the Big Ear radio telescope intercepted a strong narrowband radio signal. ",
                "It lasted for exactly 72 seconds. The astronomer on duty, Jerry R. Ehman, was so shocked that he ",
                "wrote \"Wow!\" on the computer printout.</p>",
                "<p>The signal originated from <span class=\"redacted\">empty space</span> in the constellation ",
                "Sagittarius. Despite decades of searching, the signal has <span class=\"redacted\">never repeated</span>.</p>",
                "<p><strong>ANALYSIS:</strong> The frequency was 1420.4056 MHz. This is the hydrogen line, the exact ",
                "frequency that <span class=\"redacted\">intelligent alien life</span> would logically use to ",
                "communicate across the universe.</p>",
                "<p>Current Status: We are still listening. Something is out there.</p>",
            ),
        },
        ClassifiedFile {
            id: "oumuamua",
            title: "OBJECT: 'OUMUAMUA",
            status: "CLASSIFIED",
            status_class: "status-red",
            date: "October 19, 2017",
            origin: "Interstellar Space (Vega)",
            content: concat!(
                "<p>The first interstellar object detected passing through our Solar System. Officially classified ",
                "as a comet, but its behavior defies known astrophysics.</p>",
                "<p>As 'Oumuamua left our solar system, it suddenly <span class=\"redacted\">accelerated</span> ",
                "without emitting any gas or dust, violating gravity models. NASA officially denies it, but internal ",
                "theories suggest it was an <span class=\"redacted\">extraterrestrial solar sail</span> or a probe ",
                "sent to map our system.</p>",
                "<p><strong>NOTE:</strong> Trajectory suggests it came from the direction of Vega. By the time we ",
                "pointed our advanced telescopes at it, it had already begun transmitting ",
                "<span class=\"redacted\">[DATA EXPUNGED]</span>.</p>",
            ),
        },
        ClassifiedFile {
            id: "great-attractor",
            title: "ANOMALY: THE GREAT ATTRACTOR",
            status: "CRITICAL",
            status_class: "status-red",
            date: "Ongoing",
            origin: "Zone of Avoidance",
            content: concat!(
                "<p>Our Milky Way galaxy is moving at 600 kilometers per second towards a massive, unseen region of ",
                "space known as The Great Attractor.</p>",
                "<p>It possesses the mass of tens of thousands of galaxies. The problem? It is located in the ",
                "\"Zone of Avoidance,\" obscured by our own galaxy's dust. We cannot see what is pulling us.</p>",
                "<p>Recent deep-space infrared scans revealed <span class=\"redacted\">massive structures</span> ",
                "pulling entire superclusters towards a central point. Theories range from a super-massive black ",
                "hole to a <span class=\"redacted\">rip in the fabric of spacetime</span>.</p>",
                "<p>We are being pulled into the dark.</p>",
            ),
        },
    ]
}
