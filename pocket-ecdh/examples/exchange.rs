use pocket_curve::{DomainParameters, MillerRabin};
use pocket_ecdh::{open, seal, Keypair};

use rand::rngs::OsRng;

fn main() {
    let mut rng = OsRng;
    let oracle = MillerRabin::default();

    // a 10-bit prime keeps every ASCII code point maskable
    let params = loop {
        match DomainParameters::random(10, &oracle, &mut rng) {
            Ok(params) => break params,
            Err(err) => println!("domain generation retry: {err}"),
        }
    };
    println!("prime           p = {}", params.prime());
    println!(
        "curve           y^2 = x^3 + {}x + {}",
        params.curve().a(),
        params.curve().b()
    );
    println!("points on curve {}", params.curve().points().len());
    println!("generator       G = {}", params.generator());

    let plaintext = "Hello, this is ECDH";
    let codes: Vec<u32> = plaintext.chars().map(u32::from).collect();

    // a zero private scalar (or a shared point at the identity) makes the
    // mask underivable, so draw keypairs until the seal goes through
    let (bob, message) = loop {
        let alice = Keypair::random(&mut rng, 6, &params).unwrap();
        let bob = Keypair::random(&mut rng, 6, &params).unwrap();
        println!("alice public    A = {}", alice.pubkey());
        println!("bob public      B = {}", bob.pubkey());
        match seal(&codes, &alice, bob.pubkey(), &params) {
            Ok(message) => break (bob, message),
            Err(err) => println!("keypair retry: {err}"),
        }
    };
    println!("masked codes    {:?}", message.codes);

    let received = open(&message, &bob, &params).unwrap();
    let recovered: String = received
        .iter()
        .map(|&code| char::from_u32(code).unwrap_or('?'))
        .collect();
    println!("recovered       {recovered}");
    assert_eq!(recovered, plaintext);
}
