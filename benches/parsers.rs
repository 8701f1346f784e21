// benches/parsers.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use crime_scrape::specs::{northwestern, psu};

fn listing_page(n: usize) -> String {
    let mut html = String::from("<html><body>");
    for i in 0..n {
        html.push_str(&format!(
            "<article><h2>INCIDENT #: PSU2026{i:05}</h2>\
             <div class=\"field--name-field-reported\"><div class=\"field__item\">02/02/2026 8:15 AM</div></div>\
             <div class=\"field--name-field-occurred\"><div class=\"field__item\">02/01/2026 7:44 PM to 02/01/2026 9:00 PM</div></div>\
             <div class=\"field--name-field-nature-of-incident1\"><div class=\"field__item\">Theft</div></div>\
             <div class=\"field--name-field-location\"><div class=\"field__item\">Pollock Halls</div></div>\
             <div class=\"field--name-field-case-disposition\"><div class=\"field__item\">Closed</div></div>\
             </article>"
        ));
    }
    html.push_str("</body></html>");
    html
}

fn blotter_page(n: usize) -> String {
    let mut html = String::from("<html><body><table>");
    for i in 0..n {
        html.push_str(&format!(
            "<tr><td>Case Number</td><td>2026-{i:05}</td></tr>\
             <tr><td>Date &amp; Time: Reported</td><td>February 02, 2026 at 09:10:00 AM</td></tr>\
             <tr><td>Date &amp; Time: Occurred</td><td>February 01, 2026 at 10:30:00 PM</td></tr>\
             <tr><td></td><td>February 01, 2026 at 11:45:00 PM</td></tr>\
             <tr><td>Location:</td><td>710 N Lake Shore Dr</td></tr>\
             <tr><td>Common Name:</td><td>Abbott Hall</td></tr>\
             <tr><td>Incident Type:</td><td>Theft</td></tr>\
             <tr><td>Disposition:</td><td>Open</td></tr>"
        ));
    }
    html.push_str("</table></body></html>");
    html
}

fn bench_parsers(c: &mut Criterion) {
    let listing = listing_page(50);
    let blotter = blotter_page(200);

    c.bench_function("psu_listing_page", |b| {
        b.iter(|| {
            let recs = psu::parse_page(black_box(&listing)).unwrap();
            black_box(recs.len())
        })
    });

    c.bench_function("northwestern_blotter_page", |b| {
        b.iter(|| {
            let recs = northwestern::parse_page(black_box(&blotter)).unwrap();
            black_box(recs.len())
        })
    });
}

criterion_group!(benches, bench_parsers);
criterion_main!(benches);
