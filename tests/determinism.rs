use vinekit::{ClimbDirection, SimpleBody, SwingInput, Vec2, VineManager};

fn run_level() -> (Vec<Vec<Vec2>>, SimpleBody) {
    let mut vines = VineManager::default();
    let handles: Vec<_> = [(800.0, 100.0), (1200.0, 50.0), (1800.0, 100.0)]
        .iter()
        .map(|&(x, y)| vines.create_vine(x, y, 15).unwrap())
        .collect();

    let mut body = SimpleBody::new(Vec2::new(800.0, 220.0)).with_velocity(Vec2::new(0.0, -400.0));
    for frame in 0..300 {
        match frame {
            20..=60 => {
                vines.swing(&mut body, SwingInput::Right);
            }
            61..=80 => {
                vines.climb(&mut body, ClimbDirection::Up);
            }
            120 => {
                vines.jump_off(&mut body);
            }
            _ => {}
        }
        vines.update(16.0, &mut body);
    }

    let positions = handles.iter().map(|&h| vines.positions(h).unwrap()).collect();
    (positions, body)
}

#[test]
fn level_replays_bit_for_bit() {
    let results: Vec<_> = (0..5).map(|_| run_level()).collect();
    for r in &results[1..] {
        assert_eq!(results[0].1, r.1);
        for (a, b) in results[0].0.iter().zip(r.0.iter()) {
            for (pa, pb) in a.iter().zip(b.iter()) {
                assert_eq!(pa.x, pb.x);
                assert_eq!(pa.y, pb.y);
            }
        }
    }
}
