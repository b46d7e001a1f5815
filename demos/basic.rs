//! Basic usage examples for `DynamicBitset`

use std::ops::ControlFlow;

use dyn_bitset::DynamicBitset;

fn main() -> Result<(), dyn_bitset::ParseBitsetError> {
    println!("=== DynamicBitset Basic Usage ===\n");

    // Parse from text, highest bit first
    let mut bitset: DynamicBitset<u8> = "10110100101".parse()?;
    println!("Parsed: {bitset}");
    println!("Size: {} bits in {} blocks", bitset.len(), bitset.num_blocks());
    println!("Set bits: {}", bitset.count());
    println!("Blocks: {:02x?}\n", bitset.as_blocks());

    // Single bits
    bitset.set(1, true);
    bitset.flip(10);
    println!("After set(1) and flip(10): {bitset}");

    // Growth and shrinkage
    bitset.resize(16, true);
    println!("Resized to 16 with ones: {bitset}");
    bitset.push(false);
    println!("Pushed a zero: {bitset} ({} blocks)", bitset.num_blocks());
    if let Some(bit) = bitset.pop() {
        println!("Popped: {bit}\n");
    }

    // Ranges
    bitset.reset_range(4, 8);
    println!("Cleared bits 4..12: {bitset}");
    bitset.flip_range(0, 4);
    println!("Flipped bits 0..4: {bitset}\n");

    // Shifts and logic
    let mask = DynamicBitset::<u8>::filled(16, true) << 8;
    println!("High-byte mask: {mask}");
    println!("bitset & mask:  {}", &bitset & &mask);
    println!("bitset | mask:  {}", &bitset | &mask);
    println!("!bitset:        {}\n", !&bitset);

    // Scanning
    print!("Set positions:");
    for pos in &bitset {
        print!(" {pos}");
    }
    println!();

    let first_above_eight = bitset.for_each_one(|pos| {
        if pos > 8 {
            ControlFlow::Break(pos)
        } else {
            ControlFlow::Continue(())
        }
    });
    println!("First set bit above 8: {first_above_eight:?}");

    // Custom digits
    println!("\nAs a picture: {}", bitset.to_string_with('.', '#'));

    Ok(())
}
