use coap_packet::TryIntoBytes;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use bench_input::TestInput;

fn packet_to_bytes(c: &mut Criterion) {
  let mut group = c.benchmark_group("pkt/to_bytes");
  group.measurement_time(std::time::Duration::from_secs(5));

  let inputs = vec![TestInput { tkl: 0,
                                n_opts: 0,
                                opt_size: 0,
                                payload_size: 0 },
                    TestInput { tkl: 4,
                                n_opts: 4,
                                opt_size: 8,
                                payload_size: 16 },
                    TestInput { tkl: 4,
                                n_opts: 4,
                                opt_size: 16,
                                payload_size: 16 },
                    TestInput { tkl: 4,
                                n_opts: 8,
                                opt_size: 32,
                                payload_size: 16 },
                    TestInput { tkl: 8,
                                n_opts: 8,
                                opt_size: 64,
                                payload_size: 16 },
                    TestInput { tkl: 8,
                                n_opts: 8,
                                opt_size: 64,
                                payload_size: 32 },
                    TestInput { tkl: 8,
                                n_opts: 8,
                                opt_size: 64,
                                payload_size: 128 },
                    TestInput { tkl: 8,
                                n_opts: 16,
                                opt_size: 64,
                                payload_size: 128 },
                    TestInput { tkl: 8,
                                n_opts: 16,
                                opt_size: 64,
                                payload_size: 512 },
                    TestInput { tkl: 8,
                                n_opts: 32,
                                opt_size: 64,
                                payload_size: 512 },
                    TestInput { tkl: 8,
                                n_opts: 32,
                                opt_size: 256,
                                payload_size: 1024 },
                    TestInput { tkl: 8,
                                n_opts: 32,
                                opt_size: 512,
                                payload_size: 1024 },];

  for inp in inputs.iter() {
    let bytes = inp.get_bytes();

    group.bench_with_input(BenchmarkId::new("coap_packet/alloc/size", bytes.len()),
                           inp,
                           |b, inp| {
                             b.iter_batched(|| inp.get_packet(),
                                            |pkt| pkt.try_into_bytes().unwrap(),
                                            BatchSize::SmallInput)
                           });

    let pkt = inp.get_packet();
    group.bench_with_input(BenchmarkId::new("coap_packet/buf/size", bytes.len()),
                           &pkt,
                           |b, pkt| {
                             b.iter(|| {
                                let mut buf = [0u8; 20608];
                                pkt.serialize_into(&mut buf).unwrap()
                              })
                           });

    let cl_packet = inp.get_coap_lite_packet();
    group.bench_with_input(BenchmarkId::new("coap_lite/size", bytes.len()),
                           &cl_packet,
                           |b, inp| b.iter(|| inp.to_bytes()));
  }
  group.finish();
}

criterion_group!(benches, packet_to_bytes);
criterion_main!(benches);
