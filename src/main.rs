//! Yamata DSA demonstration program

use yamata::{DsaEngine, Result};

fn main() -> Result<()> {
    println!("🔐 Yamata: Classical DSA Signature Library");
    println!("==========================================");
    println!();

    println!("🔑 Generating 1024/160-bit domain parameters and key pair...");
    println!("   (prime search over 1024-bit candidates, this can take a moment)");
    let engine = DsaEngine::generate()?;
    let snapshot = engine.snapshot();
    println!("✅ Done");
    println!("  • p: {} bits", snapshot.params.p.bits());
    println!("  • q: {} bits", snapshot.params.q.bits());
    println!("  • consistent: {}", snapshot.params.is_consistent());
    println!();

    let message = b"Hello from Yamata! This message is about to be signed.";
    println!(
        "📝 Message: \"{}\"",
        core::str::from_utf8(message).unwrap_or("<invalid utf8>")
    );

    print!("✍️  Signing... ");
    let signature = engine.sign(message)?;
    println!("✅ Success");
    println!("  • r: {}", signature.r.to_str_radix(16));
    println!("  • s: {}", signature.s.to_str_radix(16));
    println!();

    print!("🔍 Verifying signature... ");
    if engine.verify(message, &signature) {
        println!("✅ Valid signature");
    } else {
        println!("❌ Invalid signature");
    }

    print!("🔍 Verifying against a tampered message... ");
    if engine.verify(b"Hello from Yamata! This message was tampered with.", &signature) {
        println!("⚠️  Incorrectly accepted");
    } else {
        println!("✅ Correctly rejected");
    }

    print!("🔍 Verifying malformed signature text... ");
    if engine.verify_text(message, "not-a-signature") {
        println!("⚠️  Incorrectly accepted");
    } else {
        println!("✅ Correctly rejected (no panic)");
    }
    println!();

    println!("💾 Key-material text round trip:");
    let exported = engine.export_public();
    println!("{exported}");
    let verifier = DsaEngine::new(yamata::KeyMaterial::from_text(&exported)?);
    print!("🔍 Verifying with reimported public material... ");
    if verifier.verify_text(message, &signature.to_text()) {
        println!("✅ Valid signature");
    } else {
        println!("❌ Invalid signature");
    }

    Ok(())
}
